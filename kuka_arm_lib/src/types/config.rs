use crate::JointId;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Steps recorded per move in the demo sequence.
pub const DEFAULT_STEPS: i64 = 300;
/// Easing exponent used by the demo sequence.
pub const DEFAULT_ACCELERATION: f64 = 15.0;
/// Degrees each joint travels in the demo sequence.
pub const DEMO_DELTA: f64 = 45.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionKind {
    Move {
        delta: f64,
        acceleration: f64,
        step_count: i64,
    },
    Reset {
        step_count: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionStep {
    pub joint: JointId,
    #[serde(flatten)]
    pub kind: MotionKind,
}

/// An ordered motion script played against a rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub steps: Vec<MotionStep>,
}

impl MotionStep {
    pub fn move_by(joint: JointId, delta: f64, acceleration: f64, step_count: i64) -> Self {
        Self {
            joint,
            kind: MotionKind::Move {
                delta,
                acceleration,
                step_count,
            },
        }
    }

    pub fn reset(joint: JointId, step_count: i64) -> Self {
        Self {
            joint,
            kind: MotionKind::Reset { step_count },
        }
    }
}

impl MotionConfig {
    /// Every joint forward by 45°, then every joint back by 45°, in joint order.
    pub fn kuka_demo(acceleration: f64, step_count: i64) -> Self {
        let forward = JointId::ALL
            .iter()
            .map(|&joint| MotionStep::move_by(joint, DEMO_DELTA, acceleration, step_count));
        let revert = JointId::ALL
            .iter()
            .map(|&joint| MotionStep::move_by(joint, -DEMO_DELTA, acceleration, step_count));

        Self {
            steps: forward.chain(revert).collect(),
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read motion script {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MotionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if let MotionKind::Move {
                delta,
                acceleration,
                ..
            } = step.kind
            {
                if !delta.is_finite() || !acceleration.is_finite() {
                    return Err(eyre::eyre!(
                        "Motion step {} ({}) has non-finite delta {} or acceleration {}",
                        i,
                        step.joint,
                        delta,
                        acceleration
                    ));
                }
            }
        }

        Ok(())
    }

    /// Total number of samples the script records, negative counts as zero.
    pub fn total_samples(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step.kind {
                MotionKind::Move { step_count, .. } | MotionKind::Reset { step_count } => {
                    step_count.max(0) as usize
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kuka_demo_sequence() {
        let demo = MotionConfig::kuka_demo(DEFAULT_ACCELERATION, DEFAULT_STEPS);
        assert_eq!(demo.steps.len(), 12);
        assert_eq!(demo.total_samples(), 12 * 300);

        for (i, step) in demo.steps.iter().enumerate() {
            assert_eq!(step.joint, JointId::ALL[i % 6]);
            let expected_delta = if i < 6 { 45.0 } else { -45.0 };
            assert_eq!(
                step.kind,
                MotionKind::Move {
                    delta: expected_delta,
                    acceleration: 15.0,
                    step_count: 300
                }
            );
        }
    }

    #[test]
    fn test_parse_toml_script() {
        let script = r#"
            [[steps]]
            joint = "wrist"
            kind = "move"
            delta = 30.0
            acceleration = 2.0
            step_count = 50

            [[steps]]
            joint = "wrist"
            kind = "reset"
            step_count = 20
        "#;

        let config = MotionConfig::from_toml_str(script).unwrap();
        assert_eq!(
            config.steps,
            vec![
                MotionStep::move_by(JointId::Wrist, 30.0, 2.0, 50),
                MotionStep::reset(JointId::Wrist, 20),
            ]
        );
        assert_eq!(config.total_samples(), 70);
    }

    #[test]
    fn test_rejects_unknown_joint() {
        let script = r#"
            [[steps]]
            joint = "elbow"
            kind = "reset"
            step_count = 1
        "#;
        assert!(MotionConfig::from_toml_str(script).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = MotionConfig {
            steps: vec![MotionStep::move_by(JointId::Base, f64::NAN, 1.0, 10)],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("kuka_missing_motion_script.toml");
        let err = MotionConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read motion script"));
    }
}
