//! 5M1E change log entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 5M1E category of a process change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Man,
    Machine,
    Material,
    Method,
    Measurement,
    Environment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Man,
        Category::Machine,
        Category::Material,
        Category::Method,
        Category::Measurement,
        Category::Environment,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Man => write!(f, "Man"),
            Category::Machine => write!(f, "Machine"),
            Category::Material => write!(f, "Material"),
            Category::Method => write!(f, "Method"),
            Category::Measurement => write!(f, "Measurement"),
            Category::Environment => write!(f, "Environment"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "man" => Ok(Category::Man),
            "machine" => Ok(Category::Machine),
            "material" => Ok(Category::Material),
            "method" => Ok(Category::Method),
            "measurement" => Ok(Category::Measurement),
            "environment" => Ok(Category::Environment),
            _ => Err(format!(
                "Invalid 5M1E category: {}. Use man, machine, material, method, measurement, or environment",
                s
            )),
        }
    }
}

/// Assessed impact of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "High"),
            Impact::Medium => write!(f, "Medium"),
            Impact::Low => write!(f, "Low"),
        }
    }
}

/// A process change recorded around the incident window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// Change identifier (e.g., "CHG-002")
    pub id: String,

    /// Date the change took effect
    pub date: NaiveDate,

    /// 5M1E category
    pub category: Category,

    /// What changed
    pub description: String,

    /// Who made the change
    pub changed_by: String,

    /// Assessed impact
    pub impact: Impact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip_display() {
        for cat in Category::ALL {
            let parsed: Category = cat.to_string().parse().unwrap();
            assert_eq!(parsed, cat);
        }
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn test_change_deserializes_from_yaml() {
        let yaml = r#"
id: CHG-002
date: 2024-06-13
category: machine
description: Flux dispensing weight adjusted
changed_by: Process Engineering
impact: high
"#;
        let entry: ChangeLogEntry = serde_yml::from_str(yaml).unwrap();
        assert_eq!(entry.category, Category::Machine);
        assert_eq!(entry.impact, Impact::High);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 6, 13).unwrap());
    }
}
