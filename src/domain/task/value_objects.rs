use serde::{Serialize, Serializer};
use std::fmt;

use crate::domain::errors::{DispatchError, DispatchResult};

/// A single capability tag an agent may possess or a task may require
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Skill(String);

impl Skill {
    pub fn new(tag: impl Into<String>) -> Self {
        Skill(tag.into())
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of skill tags known to a deployment
///
/// # Example
/// ```
/// use agent_dispatch_api::domain::task::value_objects::{Skill, SkillCatalog};
///
/// let catalog = SkillCatalog::default();
/// assert!(catalog.contains(&Skill::new("skill2")));
/// assert!(!catalog.contains(&Skill::new("skill9")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog(Vec<Skill>);

impl SkillCatalog {
    /// Creates a catalog from a list of tags
    ///
    /// # Returns
    /// * `Err(DispatchError::InvalidValue)` - If no tags were given or a tag is blank
    pub fn new<I, S>(tags: I) -> DispatchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut skills: Vec<Skill> = Vec::new();
        for tag in tags {
            let tag: String = tag.into();
            let tag = tag.trim().to_string();
            if tag.is_empty() {
                return Err(DispatchError::InvalidValue(
                    "Skill catalog entries cannot be blank".to_string(),
                ));
            }
            let skill = Skill(tag);
            if !skills.contains(&skill) {
                skills.push(skill);
            }
        }

        if skills.is_empty() {
            return Err(DispatchError::InvalidValue(
                "Skill catalog requires at least one skill".to_string(),
            ));
        }

        Ok(SkillCatalog(skills))
    }

    pub fn contains(&self, skill: &Skill) -> bool {
        self.0.contains(skill)
    }

    pub fn skills(&self) -> &[Skill] {
        &self.0
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        SkillCatalog(vec![
            Skill::new("skill1"),
            Skill::new("skill2"),
            Skill::new("skill3"),
        ])
    }
}

/// An ordered collection of skill tags
///
/// Duplicates are tolerated; membership is all that matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<Skill>);

impl SkillSet {
    /// Builds a set from raw tags without validating them
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SkillSet(tags.into_iter().map(Skill::new).collect())
    }

    /// Validates the set against the deployment's catalog
    ///
    /// # Validation Rules
    /// - At least one skill is present
    /// - Every skill is a member of `catalog`
    pub fn validate(&self, catalog: &SkillCatalog) -> DispatchResult<()> {
        if self.0.is_empty() {
            return Err(DispatchError::InvalidValue(
                "At least one Required Skill is required".to_string(),
            ));
        }
        if let Some(unknown) = self.0.iter().find(|skill| !catalog.contains(skill)) {
            return Err(DispatchError::InvalidValue(format!(
                "Invalid Skill: {}",
                unknown
            )));
        }
        Ok(())
    }

    pub fn includes(&self, skill: &Skill) -> bool {
        self.0.contains(skill)
    }

    /// True when every skill in `required` is present in this set
    pub fn covers(&self, required: &SkillSet) -> bool {
        required.iter().all(|skill| self.includes(skill))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.0.iter()
    }
}

/// Task priority; `High` strictly preempts `Low`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Low,
}

impl Priority {
    /// Parses a raw priority value
    ///
    /// # Example
    /// ```
    /// use agent_dispatch_api::domain::task::value_objects::Priority;
    ///
    /// assert_eq!(Priority::parse("high").unwrap(), Priority::High);
    /// assert!(Priority::parse("").is_err());
    /// assert!(Priority::parse("urgent").is_err());
    /// ```
    pub fn parse(raw: &str) -> DispatchResult<Self> {
        match raw {
            "" => Err(DispatchError::InvalidValue(
                "Priority is required".to_string(),
            )),
            "high" => Ok(Priority::High),
            "low" => Ok(Priority::Low),
            other => Err(DispatchError::InvalidValue(format!(
                "Invalid Priority: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Lifecycle state of an assigned task
///
/// # State Transitions
/// ```text
/// InProgress -> Complete
/// ```
///
/// Serialized as its ordinal (`0` in progress, `1` complete).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TaskState {
    InProgress = 0,
    Complete = 1,
}

impl TaskState {
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!((self, next), (TaskState::InProgress, TaskState::Complete))
    }
}

impl Serialize for TaskState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::InProgress => write!(f, "in-progress"),
            TaskState::Complete => write!(f, "complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_skill_set_is_invalid() {
        let err = SkillSet::default()
            .validate(&SkillCatalog::default())
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::InvalidValue("At least one Required Skill is required".to_string())
        );
    }

    #[test]
    fn unknown_skill_is_invalid() {
        let err = SkillSet::from_tags(["skill1", "skill4"])
            .validate(&SkillCatalog::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Skill: skill4");
    }

    #[test]
    fn duplicate_skills_are_accepted() {
        let skills = SkillSet::from_tags(["skill2", "skill2"]);
        assert!(skills.validate(&SkillCatalog::default()).is_ok());
    }

    #[test]
    fn custom_catalog_widens_the_closed_set() {
        let catalog = SkillCatalog::new(["welding", "plumbing", "wiring", "roofing"]).unwrap();
        assert!(SkillSet::from_tags(["roofing"]).validate(&catalog).is_ok());
        assert!(SkillSet::from_tags(["skill1"]).validate(&catalog).is_err());
    }

    #[test]
    fn catalog_rejects_empty_and_blank_entries() {
        assert!(SkillCatalog::new(Vec::<String>::new()).is_err());
        assert!(SkillCatalog::new(["skill1", " "]).is_err());
    }

    #[test]
    fn catalog_collapses_duplicates() {
        let catalog = SkillCatalog::new(["a", "b", "a"]).unwrap();
        assert_eq!(catalog.skills().len(), 2);
    }

    #[test]
    fn covers_requires_every_skill() {
        let agent_skills = SkillSet::from_tags(["skill1", "skill2"]);
        assert!(agent_skills.covers(&SkillSet::from_tags(["skill2"])));
        assert!(agent_skills.covers(&SkillSet::from_tags(["skill1", "skill2"])));
        assert!(!agent_skills.covers(&SkillSet::from_tags(["skill1", "skill3"])));
    }

    #[test]
    fn includes_is_membership() {
        let skills = SkillSet::from_tags(["skill3"]);
        assert!(skills.includes(&Skill::new("skill3")));
        assert!(!skills.includes(&Skill::new("skill1")));
    }

    #[test]
    fn priority_parse_messages() {
        assert_eq!(Priority::parse("low").unwrap(), Priority::Low);
        assert_eq!(
            Priority::parse("").unwrap_err().to_string(),
            "Priority is required"
        );
        assert_eq!(
            Priority::parse("HIGH").unwrap_err().to_string(),
            "Invalid Priority: HIGH"
        );
    }

    #[test]
    fn task_state_serializes_as_ordinal() {
        assert_eq!(serde_json::to_string(&TaskState::InProgress).unwrap(), "0");
        assert_eq!(serde_json::to_string(&TaskState::Complete).unwrap(), "1");
    }

    #[test]
    fn task_state_only_moves_forward() {
        assert!(TaskState::InProgress.can_transition_to(TaskState::Complete));
        assert!(!TaskState::Complete.can_transition_to(TaskState::InProgress));
        assert!(!TaskState::InProgress.can_transition_to(TaskState::InProgress));
    }
}
