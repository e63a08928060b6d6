//! Joint rig that records every trajectory sample to a data file.
//!
//! Each recorded line holds the angles of all joints at one simulated
//! instant, with only the moving joint replaced by its interpolated value.

use crate::{generate_move, generate_reset, Joint, JointId, MotionConfig, MotionKind, Trajectory};
use eyre::{Result, WrapErr};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Default data file written by the recorder.
pub const DATA_FILE: &str = "Kuka.dat";

/// Output the rig records into.
///
/// `sync` must not return until the bytes written so far are durable for
/// this kind of sink.
pub trait Sink: Write {
    fn sync(&mut self) -> io::Result<()>;
}

impl Sink for File {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_data()
    }
}

impl Sink for Vec<u8> {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Header line: every joint name followed by a space.
pub fn format_header<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for name in names {
        line.push_str(name);
        line.push(' ');
    }
    line.push('\n');
    line
}

/// Appends one snapshot line, two decimals per angle, to `line`.
pub fn format_snapshot_into(line: &mut String, angles: &[f64]) {
    for angle in angles {
        // Writing into a String cannot fail.
        let _ = write!(line, "{:.2} ", angle);
    }
    line.push('\n');
}

pub struct Rig<S: Sink> {
    joints: Vec<Joint>,
    sink: S,
    samples_written: usize,
    poisoned: bool,
    finished: bool,
}

impl Rig<File> {
    /// Creates (truncating) `path` and records the six Kuka joints into it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("Failed to create data file {}", path.display()))?;

        let rig = Self::from_joints(file, Joint::kuka_set())?;
        info!("Recording {} joints to {}", rig.joints.len(), path.display());
        Ok(rig)
    }
}

impl<S: Sink> Rig<S> {
    /// Builds joints at zero from `names` (in column order) and writes the
    /// header line.
    pub fn with_joints<I>(sink: S, names: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let joints = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| Joint::new(id, name))
            .collect();

        Self::from_joints(sink, joints)
    }

    fn from_joints(sink: S, joints: Vec<Joint>) -> Result<Self> {
        if joints.is_empty() {
            return Err(eyre::eyre!("A rig needs at least one joint"));
        }

        let mut rig = Self {
            joints,
            sink,
            samples_written: 0,
            poisoned: false,
            finished: false,
        };

        let header = format_header(rig.joints.iter().map(|j| j.name.as_str()));
        rig.write_line(&header).wrap_err("Failed to write data file header")?;

        Ok(rig)
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn angle(&self, joint_id: impl Into<usize>) -> Result<f64> {
        let index = self.joint_index(joint_id.into())?;
        Ok(self.joints[index].theta)
    }

    /// Committed angles of all joints, in column order.
    pub fn angles(&self) -> Vec<f64> {
        self.joints.iter().map(|j| j.theta).collect()
    }

    /// Data lines recorded so far, header excluded.
    pub fn samples_written(&self) -> usize {
        self.samples_written
    }

    /// True once a write failed; the data file is then incomplete.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Eases `joint_id` from its current angle by `delta` degrees, recording
    /// one line per step. The joint commits `current + delta` only once every
    /// line is durable.
    pub fn move_joint(
        &mut self,
        joint_id: impl Into<usize>,
        delta: f64,
        acceleration: f64,
        step_count: i64,
    ) -> Result<()> {
        let index = self.joint_index(joint_id.into())?;
        let trajectory = generate_move(self.joints[index].theta, delta, acceleration, step_count);

        debug!(
            "Moving {} from {:.2} to {:.2} over {} steps (acceleration {})",
            self.joints[index].name,
            self.joints[index].theta,
            trajectory.end,
            trajectory.len(),
            acceleration
        );

        self.record(index, &trajectory)
    }

    /// Eases `joint_id` back to exactly zero.
    pub fn reset_joint(&mut self, joint_id: impl Into<usize>, step_count: i64) -> Result<()> {
        let index = self.joint_index(joint_id.into())?;
        let trajectory = generate_reset(self.joints[index].theta, step_count);

        debug!(
            "Resetting {} from {:.2} over {} steps",
            self.joints[index].name,
            self.joints[index].theta,
            trajectory.len()
        );

        self.record(index, &trajectory)
    }

    /// Resets every joint in column order.
    pub fn reset_all(&mut self, step_count: i64) -> Result<()> {
        for index in 0..self.joints.len() {
            self.reset_joint(index, step_count)?;
        }
        Ok(())
    }

    pub fn move_base(&mut self, delta: f64, acceleration: f64, step_count: i64) -> Result<()> {
        self.move_joint(JointId::Base, delta, acceleration, step_count)
    }

    pub fn move_body(&mut self, delta: f64, acceleration: f64, step_count: i64) -> Result<()> {
        self.move_joint(JointId::Body, delta, acceleration, step_count)
    }

    pub fn move_arm(&mut self, delta: f64, acceleration: f64, step_count: i64) -> Result<()> {
        self.move_joint(JointId::Arm, delta, acceleration, step_count)
    }

    pub fn move_wrist(&mut self, delta: f64, acceleration: f64, step_count: i64) -> Result<()> {
        self.move_joint(JointId::Wrist, delta, acceleration, step_count)
    }

    pub fn move_tool(&mut self, delta: f64, acceleration: f64, step_count: i64) -> Result<()> {
        self.move_joint(JointId::Tool, delta, acceleration, step_count)
    }

    pub fn move_disk(&mut self, delta: f64, acceleration: f64, step_count: i64) -> Result<()> {
        self.move_joint(JointId::Disk, delta, acceleration, step_count)
    }

    /// Plays `config` in order and stops at the first failing step.
    pub fn run(&mut self, config: &MotionConfig) -> Result<()> {
        for (i, step) in config.steps.iter().enumerate() {
            let outcome = match step.kind {
                MotionKind::Move {
                    delta,
                    acceleration,
                    step_count,
                } => self.move_joint(step.joint, delta, acceleration, step_count),
                MotionKind::Reset { step_count } => self.reset_joint(step.joint, step_count),
            };
            outcome.wrap_err_with(|| format!("Motion step {} ({}) failed", i, step.joint))?;
        }

        info!(
            "Played {} motion steps, {} samples recorded",
            config.steps.len(),
            self.samples_written
        );
        Ok(())
    }

    /// Syncs and releases the sink, reporting any final I/O error.
    pub fn finish(mut self) -> Result<()> {
        self.finished = true;
        self.sink.sync().wrap_err("Failed to sync data file on close")
    }

    fn joint_index(&self, joint_id: usize) -> Result<usize> {
        if joint_id >= self.joints.len() {
            return Err(eyre::eyre!(
                "Joint {} exceeds configured DOF ({})",
                joint_id,
                self.joints.len()
            ));
        }
        Ok(joint_id)
    }

    fn record(&mut self, index: usize, trajectory: &Trajectory) -> Result<()> {
        if self.poisoned {
            return Err(eyre::eyre!("Data file is incomplete after an earlier write failure"));
        }

        let mut snapshot = self.angles();
        let mut line = String::new();

        for angle in trajectory.iter() {
            snapshot[index] = angle;
            line.clear();
            format_snapshot_into(&mut line, &snapshot);

            if let Err(e) = self.write_line(&line) {
                self.poisoned = true;
                warn!(
                    "Write failed while moving {}, data file is incomplete after {} samples: {}",
                    self.joints[index].name, self.samples_written, e
                );
                return Err(e.wrap_err(format!("Failed to record {}", self.joints[index].name)));
            }
            self.samples_written += 1;
        }

        self.joints[index].theta = trajectory.end;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.sink.write_all(line.as_bytes())?;
        self.sink.sync()?;
        Ok(())
    }
}

impl<S: Sink> Drop for Rig<S> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.sink.sync() {
            warn!("Failed to sync data file on drop: {}", e);
        }
    }
}
