use crate::dice::{DiceSet, Die, MIN_DICE, MIN_FACES};
use crate::error::{FairDiceError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dice as supplied by the user, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceConfig {
    pub dice: Vec<Vec<i64>>,
}

impl DiceConfig {
    /// Parse comma-separated dice such as `"2,2,4,4,9,9"`
    pub fn from_args<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let dice = entries
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_faces(i, raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let config = Self { dice };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON array of arrays, e.g. `[[2,2,4,4,9,9],[1,1,6,6,8,8],[3,3,5,5,7,7]]`
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<Value> = serde_json::from_str(json)
            .map_err(|e| FairDiceError::config(format!("Invalid dice file: {}", e)))?;
        let dice = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| json_faces(i, entry))
            .collect::<Result<Vec<_>>>()?;

        let config = Self { dice };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dice.len() < MIN_DICE {
            return Err(FairDiceError::config(format!(
                "at least {} dice are required, got {}",
                MIN_DICE,
                self.dice.len()
            )));
        }

        for (i, faces) in self.dice.iter().enumerate() {
            if faces.len() < MIN_FACES {
                return Err(FairDiceError::config(format!(
                    "die #{} {:?} has {} face(s), at least {} required",
                    i + 1,
                    faces,
                    faces.len(),
                    MIN_FACES
                )));
            }
        }

        Ok(())
    }

    pub fn into_dice_set(self) -> Result<DiceSet> {
        self.validate()?;
        let dice = self
            .dice
            .into_iter()
            .map(Die::new)
            .collect::<Result<Vec<_>>>()?;
        DiceSet::new(dice)
    }
}

fn parse_faces(index: usize, raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(|face| {
            face.trim().parse::<i64>().map_err(|_| {
                FairDiceError::config(format!(
                    "die #{} \"{}\": face \"{}\" is not an integer",
                    index + 1,
                    raw,
                    face.trim()
                ))
            })
        })
        .collect()
}

fn json_faces(index: usize, entry: &Value) -> Result<Vec<i64>> {
    let faces = entry.as_array().ok_or_else(|| {
        FairDiceError::config(format!(
            "die #{} {}: expected an array of faces",
            index + 1,
            entry
        ))
    })?;

    faces
        .iter()
        .map(|face| {
            face.as_i64().ok_or_else(|| {
                FairDiceError::config(format!(
                    "die #{} {}: face {} is not an integer",
                    index + 1,
                    entry,
                    face
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_configuration_accepted() {
        let config = DiceConfig::from_args(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]).unwrap();
        let set = config.into_dice_set().unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.get(2).unwrap().faces(), &[7, 5, 3, 7, 5, 3]);
    }

    #[test]
    fn test_two_dice_rejected() {
        let err = DiceConfig::from_args(&["2,2,4,4,9,9", "6,8,1,1,8,6"]).unwrap_err();
        assert!(matches!(err, FairDiceError::Configuration(_)));
    }

    #[test]
    fn test_non_numeric_face_names_entry() {
        let err = DiceConfig::from_args(&["1,2,3", "4,x,6", "7,8,9"]).unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, FairDiceError::Configuration(_)));
        assert!(message.contains("die #2"));
        assert!(message.contains("\"x\""));
    }

    #[test]
    fn test_single_face_die_rejected() {
        let err = DiceConfig::from_args(&["1,2,3", "4", "7,8,9"]).unwrap_err();
        assert!(err.to_string().contains("die #2"));
    }

    #[test]
    fn test_empty_entry_rejected() {
        assert!(DiceConfig::from_args(&["1,2,3", "", "7,8,9"]).is_err());
    }

    #[test]
    fn test_whitespace_and_negative_faces() {
        let config = DiceConfig::from_args(&[" 1, 2 ", "-3,4", "5 ,6"]).unwrap();
        assert_eq!(config.dice[1], vec![-3, 4]);
    }

    #[test]
    fn test_json_configuration() {
        let config = DiceConfig::from_json("[[2,2,4,4,9,9],[1,1,6,6,8,8],[3,3,5,5,7,7]]").unwrap();
        assert_eq!(config.dice.len(), 3);

        assert!(DiceConfig::from_json("[[1,2],[3,4]]").is_err());
        assert!(DiceConfig::from_json("[[1,2],[3],[5,6]]").is_err());
        assert!(DiceConfig::from_json("[[1,\"a\"],[3,4],[5,6]]").is_err());
    }

    #[test]
    fn test_json_non_numeric_face_names_entry() {
        let err = DiceConfig::from_json("[[1,2],[3,\"x\"],[5,6]]").unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, FairDiceError::Configuration(_)));
        assert!(message.contains("die #2"), "{}", message);
        assert!(message.contains("[3,\"x\"]"), "{}", message);
        assert!(message.contains("\"x\""), "{}", message);
    }

    #[test]
    fn test_json_entry_that_is_not_an_array_is_named() {
        let err = DiceConfig::from_json("[[1,2],[3,4],7]").unwrap_err();
        assert!(err.to_string().contains("die #3"));

        let err = DiceConfig::from_json("[[1,2],[3,4],[5,2.5]]").unwrap_err();
        assert!(err.to_string().contains("die #3"));
    }
}
