/*!

This is the long-form manual for `survey_core` and `surveydash`.

## Survey exports

Each year of the survey is one CSV file named after the year, for example
`2025.csv`. All the files of a year are expected in the same directory, and
files with any other name are ignored.

The reader follows the usual CSV conventions:
- cells are separated by `,`
- a cell may be surrounded with double quotes, and it may then contain commas,
  line breaks and doubled quotes (`""` reads as `"`)
- `\r` characters outside quotes are ignored, so Windows line endings work
- a trailing line break does not create an empty row

The first row is the header. It must be present, even in an export without
any response. Every header is matched against the question texts known for
each logical key (see [`crate::columns`]). Cells and headers are trimmed, and
non-breaking spaces count as spaces.

Rows where every cell is empty are dropped. Rows shorter than the header read
as empty for the missing cells. Columns that match no known question are
ignored (they are listed in the debug logs).

### Repeated headers

Some questions appear several times in an export with the same header text,
for instance the country of residence:

```text
Response ID,Which country do you live in?,Which country do you live in?
1,Germany,
2,,France
```

The keys sharing a header are assigned to the columns in order: the first key
listed for that text gets the first column, the second key the second column,
and so on. If a year has fewer columns than keys for a text, the last keys are
empty for that year.

## Chart descriptions

The titles and descriptions of the charts are read from a directory holding
one JSON file per year (`2025.json`, ...):

```text
{
  "ageGroup": {
    "question": "Which age group do you belong to?",
    "description": "All respondents"
  }
}
```

`description` is optional. When a chart has no entry for the active year, the
entry of the most recent other year is used. A chart with no entry at all is
titled with its id.

## Configuration

`surveydash` reads a JSON configuration. Paths are relative to the
configuration file.

```text
{
  "outputSettings": { "title": "Digital sustainability survey", "outputDirectory": "out" },
  "dataDirectory": "surveys",
  "descriptionsDirectory": "descriptions",
  "activeYear": "2026",
  "compareYear": "2025",
  "charts": [
    { "graphId": "ageGroup", "kind": "valueCounts", "column": "ageGroup", "comparison": "horizontalBar" },
    { "graphId": "country", "kind": "valueCounts", "column": "countryOfResidence",
      "fallbackColumns": ["countryOfResidenceAlt1", "countryOfResidenceAlt2"], "comparison": "scatter" }
  ]
}
```

Top level:
- `outputSettings.title` (string): written in the summary
- `outputSettings.outputDirectory` (string, optional): where `summary.json` is
  written. The summary goes to the standard output otherwise.
- `dataDirectory` (string): the directory of the yearly exports
- `descriptionsDirectory` (string, optional): the directory of the chart
  descriptions
- `activeYear` (string, optional): defaults to the most recent export
- `compareYear` (string, optional): compares every chart that supports it with
  this year
- `palette` (object, optional): overrides some of the chart colors, for
  example `{"berry": "#000000"}`
- `charts` (array): the charts to compute, in order

Each chart:
- `graphId` (string): the id of the chart, also used to find its description
- `kind`: one of
  - `valueCounts`: number of respondents per answer
  - `freeText`: all the non-empty answers, as a list
  - `yesNoNotSure`: counts of `Yes`, `No` and `Not sure`
- `column` (string): the logical key of the question, in camelCase
- `fallbackColumns` (array of strings, optional): other keys read, in order,
  when `column` is empty
- `filterColumn`, `filterValue` (strings, optional): only the respondents
  whose `filterColumn` equals `filterValue` are counted. The response rate is
  then computed against them.
- `comparison` (optional): how to compare two years, one of `horizontalBar`,
  `dumbbell`, `scatter`, `yesNoNotSure`, `stackedBar`. Without it, the chart
  ignores the compare year.
- `splitColumn` (string): for `stackedBar`, the key whose answers make the
  rows. The answers of `column` make the stacked series.
- `dumbbell` (object, optional): options of the `dumbbell` comparison,
  `normalizeToPercentage` (default `true`), `formatAsPercentage` (defaults to
  the normalization), `sortBy` (`value`, `difference`, or the default
  `absoluteDifference`)
- `explore` (array of strings, optional): the charts shown when this chart is
  explored with `--explore`

 */
