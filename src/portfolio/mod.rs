//! Profile content shown on the portfolio page.
//!
//! JSON and YAML documents use camelCase field names. A default profile is embedded in the binary
//! and used whenever no profile file is configured.

mod store;

pub use store::PortfolioStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

const EMBEDDED_PORTFOLIO: &str = include_str!("../../data/portfolio.yaml");

/// Highest value a skill level can take
pub const MAX_SKILL_LEVEL: u8 = 100;

/// Errors that can occur when loading or changing the portfolio
#[derive(thiserror::Error, Debug)]
pub enum PortfolioError {
    #[error("portfolio data not found")]
    NotFound,

    #[error("invalid portfolio: {0}")]
    Invalid(String),

    #[error("failed to parse portfolio YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse portfolio JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read portfolio file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub geeksforgeeks: String,
    pub leetcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillItem {
    pub name: String,
    /// Proficiency between 0 and 100
    pub level: u8,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<SkillItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub live_url: String,
    pub github_url: String,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: u32,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub image: String,
    pub credential_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub date: String,
}

/// Platform-specific numbers; each platform only fills in the ones it has
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodingProfileStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingProfile {
    pub platform: String,
    pub username: String,
    #[serde(default)]
    pub stats: CodingProfileStats,
    pub icon: String,
    pub url: String,
}

/// Everything shown on the page, without bookkeeping fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub coding_profiles: Vec<CodingProfile>,
}

impl PortfolioContent {
    /// The profile bundled with the binary
    pub fn embedded() -> Result<Self, PortfolioError> {
        Self::from_yaml(EMBEDDED_PORTFOLIO)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, PortfolioError> {
        let content: Self = serde_yaml::from_str(contents)?;
        content.validate()?;
        Ok(content)
    }

    pub fn from_json(contents: &str) -> Result<Self, PortfolioError> {
        let content: Self = serde_json::from_str(contents)?;
        content.validate()?;
        Ok(content)
    }

    /// Load a profile from a `.json` file, or a YAML file for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, PortfolioError> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.personal.name.trim().is_empty() {
            return Err(PortfolioError::Invalid("personal.name must not be empty".into()));
        }
        for category in &self.skills {
            if let Some(item) = category.items.iter().find(|item| item.level > MAX_SKILL_LEVEL) {
                return Err(PortfolioError::Invalid(format!(
                    "skill '{}' has level {}, expected at most {MAX_SKILL_LEVEL}",
                    item.name, item.level
                )));
            }
        }
        let mut ids = HashSet::new();
        if let Some(project) = self.projects.iter().find(|project| !ids.insert(project.id)) {
            return Err(PortfolioError::Invalid(format!("duplicate project id {}", project.id)));
        }
        Ok(())
    }

    pub fn featured_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| project.featured)
    }
}

/// A partial change: only the sections that are present get replaced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    #[serde(default)]
    pub personal: Option<PersonalInfo>,
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
    #[serde(default)]
    pub skills: Option<Vec<SkillCategory>>,
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
    #[serde(default)]
    pub experience: Option<Vec<Experience>>,
    #[serde(default)]
    pub certifications: Option<Vec<Certification>>,
    #[serde(default)]
    pub achievements: Option<Vec<Achievement>>,
    #[serde(default)]
    pub coding_profiles: Option<Vec<CodingProfile>>,
}

impl PortfolioUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy every provided section over `content`.
    pub fn apply_to(self, content: &mut PortfolioContent) {
        if let Some(personal) = self.personal {
            content.personal = personal;
        }
        if let Some(social_links) = self.social_links {
            content.social_links = social_links;
        }
        if let Some(skills) = self.skills {
            content.skills = skills;
        }
        if let Some(projects) = self.projects {
            content.projects = projects;
        }
        if let Some(experience) = self.experience {
            content.experience = experience;
        }
        if let Some(certifications) = self.certifications {
            content.certifications = certifications;
        }
        if let Some(achievements) = self.achievements {
            content.achievements = achievements;
        }
        if let Some(coding_profiles) = self.coding_profiles {
            content.coding_profiles = coding_profiles;
        }
    }
}

/// The stored portfolio document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: Uuid,
    #[serde(flatten)]
    pub content: PortfolioContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    pub fn new(content: PortfolioContent) -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(), content, created_at: now, updated_at: now }
    }
}
