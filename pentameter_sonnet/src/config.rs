// Finder configuration, loaded from JSON.
//
// Every field has a default, so `{}` is a complete config. Unknown fields
// are rejected. The binary applies its command-line flags on top of whatever
// was loaded.
//
// Example:
//
//   {
//     "similarity_limit": 0.0,
//     "distinct_final_words": true,
//     "rhyme_classes": "data/rhyme_classes.json",
//     "prose_filter": true,
//     "parallel": false
//   }

use std::path::{Path, PathBuf};

use pentameter_phonetics::ConsonantClasses;
use pentameter_phonetics::similarity::DEFAULT_SIMILARITY_LIMIT;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pairing::PairRule;
use crate::rhyme::{RhymeKeyer, default_keyer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinderConfig {
    /// Slant-rhyme similarity limit; `null` turns the check off.
    #[serde(default = "default_similarity_limit")]
    pub similarity_limit: Option<f64>,
    #[serde(default = "default_true")]
    pub distinct_final_words: bool,
    /// Consonant class table replacing the built-in one.
    #[serde(default)]
    pub rhyme_classes: Option<PathBuf>,
    /// Skip lines that do not look like prose.
    #[serde(default = "default_true")]
    pub prose_filter: bool,
    /// Scan lines on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

fn default_similarity_limit() -> Option<f64> {
    Some(DEFAULT_SIMILARITY_LIMIT)
}

fn default_true() -> bool {
    true
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            similarity_limit: default_similarity_limit(),
            distinct_final_words: true,
            rhyme_classes: None,
            prose_filter: true,
            parallel: false,
        }
    }
}

impl FinderConfig {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// The rhyme keyer this config asks for.
    pub fn keyer(&self) -> Result<RhymeKeyer> {
        match &self.rhyme_classes {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                Ok(RhymeKeyer::new(ConsonantClasses::from_json(&json)?))
            }
            None => Ok(default_keyer()),
        }
    }

    pub fn pair_rule(&self) -> PairRule {
        PairRule {
            distinct_final_words: self.distinct_final_words,
            similarity_limit: self.similarity_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SonnetError;
    use pentameter_phonetics::Phoneme;

    #[test]
    fn test_empty_object_is_default() {
        let config = FinderConfig::from_json("{}").unwrap();
        assert_eq!(config, FinderConfig::default());
        assert_eq!(config.pair_rule(), PairRule::default());
    }

    #[test]
    fn test_null_limit_disables_similarity() {
        let config = FinderConfig::from_json(r#"{"similarity_limit": null}"#).unwrap();
        assert_eq!(config.similarity_limit, None);
        assert_eq!(config.pair_rule().similarity_limit, None);
    }

    #[test]
    fn test_fields_override_defaults() {
        let config = FinderConfig::from_json(
            r#"{
                "similarity_limit": 0.0,
                "distinct_final_words": false,
                "prose_filter": false,
                "parallel": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.similarity_limit, Some(0.0));
        assert!(!config.distinct_final_words);
        assert!(!config.prose_filter);
        assert!(config.parallel);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(FinderConfig::from_json(r#"{"similarity": 0.0}"#).is_err());
        assert!(FinderConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_keyer_reads_class_table() {
        let path = std::env::temp_dir().join(format!(
            "pentameter_classes_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"classes": [{"label": "stops", "members": ["P", "T", "K"]}]}"#)
            .unwrap();
        let config = FinderConfig {
            rhyme_classes: Some(path.clone()),
            ..FinderConfig::default()
        };
        let keyer = config.keyer().unwrap();
        std::fs::remove_file(&path).unwrap();

        let classes = keyer.classes();
        assert!(classes.equivalent(Phoneme::P, Phoneme::K));
        assert!(!classes.equivalent(Phoneme::T, Phoneme::D));
    }

    #[test]
    fn test_missing_class_table_is_an_io_error() {
        let config = FinderConfig {
            rhyme_classes: Some(PathBuf::from("/nonexistent/classes.json")),
            ..FinderConfig::default()
        };
        assert!(matches!(config.keyer(), Err(SonnetError::Io(_))));
    }
}
