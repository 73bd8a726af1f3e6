use crate::domain::agent::Agent;
use crate::domain::task::SkillSet;

/// Builds the fixed starting roster registered at startup
pub fn seed_agents() -> Vec<Agent> {
    vec![
        Agent::new("Adam", SkillSet::from_tags(["skill1", "skill2"])),
        Agent::new("Betty", SkillSet::from_tags(["skill2", "skill3"])),
        Agent::new("Charlie", SkillSet::from_tags(["skill1"])),
    ]
}
