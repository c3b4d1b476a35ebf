//! The closed set of logical survey columns.
//!
//! Every key is tied to the header text used by the yearly exports. Several
//! keys may share the same header (the country of residence is repeated in
//! older exports): they are assigned to distinct columns in the order in
//! which they are listed here.

use crate::config::{ColumnDefinition, SurveyError, SurveyResult};

macro_rules! survey_columns {
    ($($variant:ident => $name:literal, $header:literal;)+) => {
        /// A stable identifier for a survey question, independent of the
        /// header text used in a given year.
        #[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
        pub enum SurveyColumnKey {
            $($variant,)+
        }

        /// All the column definitions, in claim order.
        pub const COLUMN_DEFINITIONS: &[ColumnDefinition<SurveyColumnKey>] = &[
            $(ColumnDefinition {
                key: SurveyColumnKey::$variant,
                header: $header,
            },)+
        ];

        impl SurveyColumnKey {
            /// The camelCase name used in configuration files.
            pub fn name(self) -> &'static str {
                match self {
                    $(SurveyColumnKey::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<SurveyColumnKey> {
                match name {
                    $($name => Some(SurveyColumnKey::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

survey_columns! {
    ResponseId => "responseId", "Response ID";
    DateSubmitted => "dateSubmitted", "Date submitted";
    LastPage => "lastPage", "Last page";
    StartLanguage => "startLanguage", "Start language";
    Seed => "seed", "Seed";
    AgeGroup => "ageGroup", "Which age group do you belong to?";
    ProfessionalExperienceYears => "professionalExperienceYears", "How many years of professional experience do you have in IT/software engineering? ";
    Continent => "continent", "Which continent do you live on? ";
    CountryOfResidence => "countryOfResidence", "What is your current country of residence? ";
    CountryOfResidenceAlt1 => "countryOfResidenceAlt1", "What is your current country of residence?";
    CountryOfResidenceAlt2 => "countryOfResidenceAlt2", "What is your current country of residence?";
    CountryOfResidenceAlt3 => "countryOfResidenceAlt3", "What is your current country of residence?";
    CountryOfResidenceAlt4 => "countryOfResidenceAlt4", "What is your current country of residence?";
    Role => "role", "Which of the following best describes your current role in the organization? ";
    RoleOther => "roleOther", "Which of the following best describes your current role in the organization?  [Other]";
    OrganizationType => "organizationType", "Which of the following organizational types best describes your organization? ";
    PrimaryApplicationDomain => "primaryApplicationDomain", "In which application domain do you currently primarily work? ";
    PrimaryApplicationDomainOther => "primaryApplicationDomainOther", "In which application domain do you currently primarily work?  [Other]";
    HeardOfDigitalSustainabilityDefinition => "heardOfDigitalSustainabilityDefinition", "We consider Digital Sustainability an umbrella term for two aspects: Sustainable Software and Sustainable by Software.  Sustainable Software concerns the sustainability of digital solutions in terms of their impact on environmental, economic, technical, social, and individual dimensions, including carbon footprint (Green IT) and process resources.  Sustainable by Software describes digital solutions designed to achieve positive sustainability impacts to help individuals and organizations reach sustainability goals, such as such as the United Nations Sustainable Development Goals (SDGs) more effectively.  Have you heard of this or a similar definition of digital sustainability before?  ";
    DiscussionFrequency => "discussionFrequency", "How frequently do you encounter (e.g., coming across or taking part in) discussions about digital sustainability in your professional environment?  ";
    DiscussionFrequencyOther => "discussionFrequencyOther", "How frequently do you encounter (e.g., coming across or taking part in) discussions about digital sustainability in your professional environment?   [Other]";
    ParticipatedInTraining => "participatedInTraining", "Have you participated in one or more training or educational programs on digital sustainability? ";
    TrainingNotAware => "trainingNotAware", "What are the reasons you haven’t participated in a training or educational program on digital sustainability before?  [I was not aware such programs existed]";
    TrainingNoOrganizationOffer => "trainingNoOrganizationOffer", "What are the reasons you haven’t participated in a training or educational program on digital sustainability before?  [My organization does not offer such programs]";
    TrainingNoOpportunity => "trainingNoOpportunity", "What are the reasons you haven’t participated in a training or educational program on digital sustainability before?  [I have not had the opportunity to attend]";
    TrainingNoNeed => "trainingNoNeed", "What are the reasons you haven’t participated in a training or educational program on digital sustainability before?  [I don’t see the need for such training]";
    TrainingTooExpensive => "trainingTooExpensive", "What are the reasons you haven’t participated in a training or educational program on digital sustainability before?  [The cost is too high]";
    TrainingOtherReason => "trainingOtherReason", "What are the reasons you haven’t participated in a training or educational program on digital sustainability before?  [Other]";
    TrainingCount => "trainingCount", "How many times training(s) or educational program(s) on digital sustainability did you participate in?  ";
    TrainingPrivateCapacity => "trainingPrivateCapacity", "Did you participate in the training(s) or educational program(s) in your private capacity (i.e., you paid for it and participated out of personal interest)? ";
    TrainingDescription => "trainingDescription", "Please tell us a little about the training or educational programs on digital sustainability you participated in. ";
    TrainingSatisfaction => "trainingSatisfaction", "Are you satisfied with the number of trainings or educational programs you participated in?  ";
    NotMoreTrainingNotAware => "notMoreTrainingNotAware", "What are the reasons you haven’t participated in more training or educational programs on digital sustainability?   [ I was not aware such programs existed]";
    NotMoreTrainingNoOrganization => "notMoreTrainingNoOrganization", "What are the reasons you haven’t participated in more training or educational programs on digital sustainability?   [My organization does not offer such programs]";
    NotMoreTrainingNoOpportunity => "notMoreTrainingNoOpportunity", "What are the reasons you haven’t participated in more training or educational programs on digital sustainability?   [I have not had the opportunity to attend]";
    NotMoreTrainingNoNeed => "notMoreTrainingNoNeed", "What are the reasons you haven’t participated in more training or educational programs on digital sustainability?   [I don’t see the need for such training]";
    NotMoreTrainingTooExpensive => "notMoreTrainingTooExpensive", "What are the reasons you haven’t participated in more training or educational programs on digital sustainability?   [The cost is too high]";
    NotMoreTrainingOther => "notMoreTrainingOther", "What are the reasons you haven’t participated in more training or educational programs on digital sustainability?   [Other]";
    OrganizationHasDigitalSustainabilityGoals => "organizationHasDigitalSustainabilityGoals", "Does your organization have specific digital sustainability goals or benchmarks for software development projects? ";
    OrganizationHasSustainabilityTeam => "organizationHasSustainabilityTeam", "Does your organization have a dedicated sustainability or Corporate Social Responsibility (CSR) expert, team or department? ";
    OrganizationIncorporatesSustainablePractices => "organizationIncorporatesSustainablePractices", "Does your organization incorporate sustainable development practices? ";
    OrganizationDepartmentCoordination => "organizationDepartmentCoordination", "Do different departments in your organization coordinate on sustainability for software development projects? ";
    ConsiderEnvironmental => "considerEnvironmental", "Which dimensions of sustainability are actively considered in your organization's software development projects?  [Environmental sustainability (e.g., resource efficiency of energy/water/..., carbon footprint)]";
    ConsiderSocial => "considerSocial", "Which dimensions of sustainability are actively considered in your organization's software development projects?  [Social sustainability (e.g., role of community, shared values, working conditions, and well-being)]";
    ConsiderIndividual => "considerIndividual", "Which dimensions of sustainability are actively considered in your organization's software development projects?  [Individual sustainability (e.g., health, competence, access to services)]";
    ConsiderEconomic => "considerEconomic", "Which dimensions of sustainability are actively considered in your organization's software development projects?  [Economic sustainability (e.g., cost efficiency, economic viability)]";
    ConsiderTechnical => "considerTechnical", "Which dimensions of sustainability are actively considered in your organization's software development projects?  [Technical sustainability (e.g., maintainability, scalability)]";
    ConsiderOther => "considerOther", "Which dimensions of sustainability are actively considered in your organization's software development projects?  [Other]";
    OrganizationReportsOnSustainability => "organizationReportsOnSustainability", "Does your organization report on sustainability practices?  ";
    OrganizationOffersTraining => "organizationOffersTraining", "Does your organization offer training or resources to employees on sustainable software development practices? ";
    OrganizationTrainingDescription => "organizationTrainingDescription", "Can you tell us a little about the training or resources your organization offers?  ";
    OrgNoTrainingLackAwareness => "orgNoTrainingLackAwareness", "What might be the reasons your organization does not offer any or more training or resources on the design or development of sustainable digital solutions?  [Lack of awareness about the availability of such training]";
    OrgNoTrainingLackUnderstanding => "orgNoTrainingLackUnderstanding", "What might be the reasons your organization does not offer any or more training or resources on the design or development of sustainable digital solutions?  [Lack of understanding about the need for such training]";
    OrgNoTrainingNoDemand => "orgNoTrainingNoDemand", "What might be the reasons your organization does not offer any or more training or resources on the design or development of sustainable digital solutions?  [No demand or interest from employees]";
    OrgNoTrainingLimitedBudget => "orgNoTrainingLimitedBudget", "What might be the reasons your organization does not offer any or more training or resources on the design or development of sustainable digital solutions?  [Limited budget or resources for training programs]";
    OrgNoTrainingNotPriority => "orgNoTrainingNotPriority", "What might be the reasons your organization does not offer any or more training or resources on the design or development of sustainable digital solutions?  [Sustainability is (perhaps) not a priority for the organization]";
    OrgNoTrainingNotSure => "orgNoTrainingNotSure", "What might be the reasons your organization does not offer any or more training or resources on the design or development of sustainable digital solutions?  [Not sure]";
    OrgNoTrainingOther => "orgNoTrainingOther", "What might be the reasons your organization does not offer any or more training or resources on the design or development of sustainable digital solutions?  [Other]";
    CustomerRequirementFrequency => "customerRequirementFrequency", "How often is the sustainability of your digital solutions an explicit requirement of the customer or the users? ";
    CustomerNotRequestingReasons => "customerNotRequestingReasons", "Why do you think that your customers and users have not asked explicitly to build sustainable digital solutions? ";
    PersonIncorporatesSustainability => "personIncorporatesSustainability", "Do you incorporate digital sustainability considerations in your role-specific tasks?  ";
    DriveOrganizationalPolicies => "driveOrganizationalPolicies", "What drives you to incorporate digital sustainability in your role-related tasks?  [Organizational policies ]";
    DrivePersonalBeliefs => "drivePersonalBeliefs", "What drives you to incorporate digital sustainability in your role-related tasks?  [Personal beliefs ]";
    DriveClientRequirements => "driveClientRequirements", "What drives you to incorporate digital sustainability in your role-related tasks?  [Client requirements ]";
    DriveUserRequirements => "driveUserRequirements", "What drives you to incorporate digital sustainability in your role-related tasks?  [User requirements]";
    DriveLegalRequirements => "driveLegalRequirements", "What drives you to incorporate digital sustainability in your role-related tasks?  [Legal requirements ]";
    DriveOther => "driveOther", "What drives you to incorporate digital sustainability in your role-related tasks?  [Other]";
    RoleConsiderEnvironmental => "roleConsiderEnvironmental", "Which sustainability dimensions do you consider in your role-specific tasks?   [Environmental sustainability (e.g., resource efficiency of energy/water/…, carbon footprint)]";
    RoleConsiderSocial => "roleConsiderSocial", "Which sustainability dimensions do you consider in your role-specific tasks?   [Social sustainability (e.g., the role of community, shared values, working conditions, and well-being)  ]";
    RoleConsiderIndividual => "roleConsiderIndividual", "Which sustainability dimensions do you consider in your role-specific tasks?   [Individual sustainability (e.g., health, competence, access to services)]";
    RoleConsiderEconomic => "roleConsiderEconomic", "Which sustainability dimensions do you consider in your role-specific tasks?   [Economic sustainability (e.g., cost efficiency, economic viability)]";
    RoleConsiderTechnical => "roleConsiderTechnical", "Which sustainability dimensions do you consider in your role-specific tasks?   [Technical sustainability (e.g., maintainability, scalability)]";
    RoleConsiderOther => "roleConsiderOther", "Which sustainability dimensions do you consider in your role-specific tasks?   [Other]";
    UsesTools => "usesTools", "Are there specific tools, software, or frameworks that help you incorporate sustainability into your tasks? (E.g., gathering and managing requirements, writing sustainability-focused tests, optimizing code for less energy consumption.) ";
    ToolsDescription => "toolsDescription", "Can you name the tools, software, and/or frameworks, and tell us how and for what you use them?  ";
    HindranceLackInterest => "hindranceLackInterest", "What hinders you from incorporating sustainability in your role-specific tasks?   [Lack of personal interest (e.g., no incentive to make the effort to consider sustainability)]";
    HindranceLackKnowledge => "hindranceLackKnowledge", "What hinders you from incorporating sustainability in your role-specific tasks?   [Lack of knowledge or awareness (e.g., not knowing enough about sustainability impact or best practices)]";
    HindranceLimitedResources => "hindranceLimitedResources", "What hinders you from incorporating sustainability in your role-specific tasks?   [Limited resources or budget (e.g., financial constraints, insufficient tools or technology)]";
    HindranceFinancialConstraints => "hindranceFinancialConstraints", "What hinders you from incorporating sustainability in your role-specific tasks?   [Financial constraints (e.g., limited budget)]";
    HindranceInsufficientTime => "hindranceInsufficientTime", "What hinders you from incorporating sustainability in your role-specific tasks?   [Insufficient time or competing priorities (e.g., pressing deadlines, other projects taking precedence)]";
    HindranceLackSupport => "hindranceLackSupport", "What hinders you from incorporating sustainability in your role-specific tasks?   [Lack of organizational or leadership support (e.g., limited buy-in from management, inadequate policy frameworks)]";
    HindranceComplexity => "hindranceComplexity", "What hinders you from incorporating sustainability in your role-specific tasks?   [Complexity or uncertainty of sustainability solutions (e.g., difficulty measuring impact or navigating standards)]";
    HindranceCulturalBarriers => "hindranceCulturalBarriers", "What hinders you from incorporating sustainability in your role-specific tasks?   [Cultural or social barriers (e.g., resistance to change, misalignment with organizational culture)]";
    HindranceStakeholderResistance => "hindranceStakeholderResistance", "What hinders you from incorporating sustainability in your role-specific tasks?   [Resistance from the stakeholders, such as clients and customers]";
    HindranceOther => "hindranceOther", "What hinders you from incorporating sustainability in your role-specific tasks?   [Other]";
    LackKnowledgeEnvironmental => "lackKnowledgeEnvironmental", "Which sustainability dimension(s) do you feel you lack sufficient knowledge or tools to effectively address?  [Environmental sustainability (e.g., resource efficiency of energy/water/…, carbon footprint)]";
    LackKnowledgeSocial => "lackKnowledgeSocial", "Which sustainability dimension(s) do you feel you lack sufficient knowledge or tools to effectively address?  [Social sustainability (e.g., role of community, shared values)]";
    LackKnowledgeIndividual => "lackKnowledgeIndividual", "Which sustainability dimension(s) do you feel you lack sufficient knowledge or tools to effectively address?  [Individual sustainability (e.g., health, competence, access to services)]";
    LackKnowledgeEconomic => "lackKnowledgeEconomic", "Which sustainability dimension(s) do you feel you lack sufficient knowledge or tools to effectively address?  [Economic sustainability (e.g., cost efficiency, economic viability)]";
    LackKnowledgeTechnical => "lackKnowledgeTechnical", "Which sustainability dimension(s) do you feel you lack sufficient knowledge or tools to effectively address?  [Technical sustainability (e.g., maintainability, scalability)]";
    LackKnowledgeNone => "lackKnowledgeNone", "Which sustainability dimension(s) do you feel you lack sufficient knowledge or tools to effectively address?  [I have sufficient knowledge and tools to effectively address all five sustainability dimensions]";
    LackKnowledgeOther => "lackKnowledgeOther", "Which sustainability dimension(s) do you feel you lack sufficient knowledge or tools to effectively address?  [Other]";
    SupportNeedTheoretical => "supportNeedTheoretical", "What additional support or resources would help you integrate digital sustainability into your work?  [Theoretical knowledge (self-study learning material)]";
    SupportNeedTutorials => "supportNeedTutorials", "What additional support or resources would help you integrate digital sustainability into your work?  [Tutorials (co-present or online training)]";
    SupportNeedCurricula => "supportNeedCurricula", "What additional support or resources would help you integrate digital sustainability into your work?  [Curricula (educational programs)]";
    SupportNeedPractical => "supportNeedPractical", "What additional support or resources would help you integrate digital sustainability into your work?  [Practical knowledge (how-to's)]";
    SupportNeedCaseStudies => "supportNeedCaseStudies", "What additional support or resources would help you integrate digital sustainability into your work?  [Positive case studies (real-world examples demonstrating benefits, including financial value)]";
    SupportNeedStructures => "supportNeedStructures", "What additional support or resources would help you integrate digital sustainability into your work?  [Structures (frameworks, definitions, standards)]";
    SupportNeedTools => "supportNeedTools", "What additional support or resources would help you integrate digital sustainability into your work?  [Tools (assessment checklists, creativity methods)]";
    SupportNeedNone => "supportNeedNone", "What additional support or resources would help you integrate digital sustainability into your work?  [I do not want to integrate more digital sustainability into my work]";
    SupportNeedOther => "supportNeedOther", "What additional support or resources would help you integrate digital sustainability into your work?  [Other]";
}

/// The number of logical columns. Every record holds exactly this many values.
pub const COLUMN_COUNT: usize = COLUMN_DEFINITIONS.len();

impl SurveyColumnKey {
    /// The position of this key in the definition list, which is also its
    /// slot in a record.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The expected header text for this key.
    pub fn header(self) -> &'static str {
        COLUMN_DEFINITIONS[self.index()].header
    }

    pub fn all() -> impl Iterator<Item = SurveyColumnKey> {
        COLUMN_DEFINITIONS.iter().map(|d| d.key)
    }

    /// Like `from_name`, for names coming from user input.
    pub fn parse(name: &str) -> SurveyResult<SurveyColumnKey> {
        SurveyColumnKey::from_name(name).ok_or_else(|| SurveyError::UnknownColumn {
            name: name.to_string(),
        })
    }
}

/// The columns that all hold the country of residence, from the most recent
/// layout to the legacy ones.
pub const COUNTRY_OF_RESIDENCE_COLUMNS: [SurveyColumnKey; 5] = [
    SurveyColumnKey::CountryOfResidence,
    SurveyColumnKey::CountryOfResidenceAlt1,
    SurveyColumnKey::CountryOfResidenceAlt2,
    SurveyColumnKey::CountryOfResidenceAlt3,
    SurveyColumnKey::CountryOfResidenceAlt4,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_follow_definition_order() {
        for (idx, def) in COLUMN_DEFINITIONS.iter().enumerate() {
            assert_eq!(def.key.index(), idx);
        }
    }

    #[test]
    fn names_round_trip() {
        let names: HashSet<&str> = SurveyColumnKey::all().map(|k| k.name()).collect();
        assert_eq!(names.len(), COLUMN_COUNT);
        for key in SurveyColumnKey::all() {
            assert_eq!(SurveyColumnKey::from_name(key.name()), Some(key));
        }
        assert_eq!(SurveyColumnKey::from_name("notAColumn"), None);
        assert!(SurveyColumnKey::parse("notAColumn").is_err());
    }

    #[test]
    fn country_columns_share_a_header() {
        let headers: HashSet<&str> = COUNTRY_OF_RESIDENCE_COLUMNS
            .iter()
            .map(|k| k.header().trim())
            .collect();
        assert_eq!(headers.len(), 1);
    }
}
