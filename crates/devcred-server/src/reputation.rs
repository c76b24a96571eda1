//! Repository reputation scoring

use github_client::RepoStats;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub fn from_score(score: u64) -> Self {
        match score {
            0..=49 => Tier::Bronze,
            50..=249 => Tier::Silver,
            250..=999 => Tier::Gold,
            _ => Tier::Platinum,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }

    /// Accent color used on the badge artwork
    pub fn accent(&self) -> &'static str {
        match self {
            Tier::Bronze => "#cd7f32",
            Tier::Silver => "#c0c0c0",
            Tier::Gold => "#ffd700",
            Tier::Platinum => "#7fdbff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reputation {
    pub score: u64,
    pub tier: Tier,
}

impl Reputation {
    /// stars * 2 + forks * 3 + watchers
    pub fn for_repo(repo: &RepoStats) -> Self {
        let score = repo
            .stars
            .saturating_mul(2)
            .saturating_add(repo.forks.saturating_mul(3))
            .saturating_add(repo.watchers);

        Self {
            score,
            tier: Tier::from_score(score),
        }
    }
}
