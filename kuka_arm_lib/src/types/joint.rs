use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rotational axes on the Kuka arm.
pub const KUKA_DOF: usize = 6;

/// The six Kuka joints, in recording order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointId {
    Base = 0,
    Body = 1,
    Arm = 2,
    Wrist = 3,
    Tool = 4,
    Disk = 5,
}

impl JointId {
    pub const ALL: [JointId; KUKA_DOF] = [
        JointId::Base,
        JointId::Body,
        JointId::Arm,
        JointId::Wrist,
        JointId::Tool,
        JointId::Disk,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column label written to the data file header.
    pub fn name(self) -> &'static str {
        match self {
            JointId::Base => "KukaTheta-1",
            JointId::Body => "KukaTheta-2",
            JointId::Arm => "KukaTheta-3",
            JointId::Wrist => "KukaTheta-4",
            JointId::Tool => "KukaTheta-5",
            JointId::Disk => "KukaTheta-6",
        }
    }
}

impl From<JointId> for usize {
    fn from(id: JointId) -> usize {
        id.index()
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One rotational axis of the arm.
///
/// `theta` only ever holds a committed resting angle (degrees); the
/// intermediate samples of a move live in a [`crate::Trajectory`].
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub id: usize,
    pub name: String,
    pub theta: f64,
}

impl Joint {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            theta: 0.0,
        }
    }

    /// The six Kuka joints at their zero resting angle.
    pub fn kuka_set() -> Vec<Joint> {
        JointId::ALL
            .iter()
            .map(|&id| Joint::new(id.index(), id.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_order_matches_indices() {
        for (i, id) in JointId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(usize::from(*id), i);
        }
    }

    #[test]
    fn test_kuka_set_names() {
        let joints = Joint::kuka_set();
        let names: Vec<&str> = joints.iter().map(|j| j.name.as_str()).collect();

        assert_eq!(
            names,
            [
                "KukaTheta-1",
                "KukaTheta-2",
                "KukaTheta-3",
                "KukaTheta-4",
                "KukaTheta-5",
                "KukaTheta-6"
            ]
        );
        assert!(joints.iter().all(|j| j.theta == 0.0));
    }
}
