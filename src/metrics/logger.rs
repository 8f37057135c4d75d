//! Training loggers for the round protocol.
//!
//! The orchestration layer assembles a [`RoundSnapshot`] after each applied
//! update (typically from the learner's per-call
//! [`GradientReport`](crate::agents::GradientReport)s) and hands it to a
//! logger backend.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Metrics snapshot for one update round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Update round (applied optimizer steps so far).
    pub round: usize,
    /// Training epoch fed to the entropy schedule this round.
    pub epoch: usize,
    /// Trajectories merged into this round's update.
    pub trajectories: usize,
    /// Total environment steps across those trajectories.
    pub env_steps: usize,
    /// Mean reward per trajectory.
    pub avg_reward: f32,
    /// Mean policy-gradient loss across merged trajectories.
    pub policy_loss: f32,
    /// Mean critic loss, absent for the actor-only variant.
    pub critic_loss: Option<f32>,
    /// Mean summed entropy across merged trajectories.
    pub entropy: f32,
    /// Entropy-bonus weight used this round.
    pub entropy_weight: f32,
}

impl RoundSnapshot {
    /// Create a snapshot with zeroed losses.
    pub fn new(round: usize, epoch: usize, trajectories: usize, env_steps: usize) -> Self {
        Self {
            round,
            epoch,
            trajectories,
            env_steps,
            avg_reward: 0.0,
            policy_loss: 0.0,
            critic_loss: None,
            entropy: 0.0,
            entropy_weight: 0.0,
        }
    }

    /// Set the reward statistic.
    pub fn with_avg_reward(mut self, avg_reward: f32) -> Self {
        self.avg_reward = avg_reward;
        self
    }

    /// Set the loss statistics.
    pub fn with_losses(mut self, policy_loss: f32, critic_loss: Option<f32>, entropy: f32) -> Self {
        self.policy_loss = policy_loss;
        self.critic_loss = critic_loss;
        self.entropy = entropy;
        self
    }

    /// Set the entropy-bonus weight.
    pub fn with_entropy_weight(mut self, entropy_weight: f32) -> Self {
        self.entropy_weight = entropy_weight;
        self
    }
}

/// Logger trait for different logging backends.
pub trait MetricsLogger: Send {
    /// Log one round snapshot.
    fn log(&mut self, snapshot: &RoundSnapshot);

    /// Flush any buffered output.
    fn flush(&mut self);
}

/// Console logger with aligned columns.
pub struct ConsoleLogger {
    log_interval: usize,
    last_log_round: usize,
    start_time: Instant,
    show_header: bool,
}

impl ConsoleLogger {
    /// Create a new console logger.
    ///
    /// # Arguments
    ///
    /// * `log_interval` - Rounds between log entries
    pub fn new(log_interval: usize) -> Self {
        Self {
            log_interval,
            last_log_round: 0,
            start_time: Instant::now(),
            show_header: true,
        }
    }

    /// Reset the start time.
    pub fn reset_timer(&mut self) {
        self.start_time = Instant::now();
    }

    fn print_header(&self) {
        println!(
            "{:>8} {:>10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>8} {:>8}",
            "Round", "Epoch", "Traj", "Reward", "Policy", "Critic", "Entropy", "EntW", "SPS"
        );
        println!("{}", "-".repeat(88));
    }
}

impl MetricsLogger for ConsoleLogger {
    fn log(&mut self, snapshot: &RoundSnapshot) {
        if snapshot.round < self.last_log_round + self.log_interval {
            return;
        }

        if self.show_header {
            self.print_header();
            self.show_header = false;
        }

        let elapsed = self.start_time.elapsed().as_secs_f32();
        let sps = if elapsed > 0.0 {
            snapshot.env_steps as f32 / elapsed
        } else {
            0.0
        };
        let critic = snapshot
            .critic_loss
            .map(|loss| format!("{:>10.4}", loss))
            .unwrap_or_else(|| format!("{:>10}", "-"));

        println!(
            "{:>8} {:>10} {:>6} {:>10.2} {:>10.4} {} {:>10.4} {:>8.3} {:>8.0}",
            snapshot.round,
            snapshot.epoch,
            snapshot.trajectories,
            snapshot.avg_reward,
            snapshot.policy_loss,
            critic,
            snapshot.entropy,
            snapshot.entropy_weight,
            sps
        );

        self.last_log_round = snapshot.round;
    }

    fn flush(&mut self) {
        // stdout is typically line-buffered, so nothing to do
    }
}

/// CSV file logger for analysis.
pub struct CsvLogger {
    writer: BufWriter<File>,
    start_time: Instant,
}

impl CsvLogger {
    /// Create a new CSV logger.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(
            writer,
            "round,epoch,trajectories,env_steps,avg_reward,policy_loss,critic_loss,entropy,entropy_weight,elapsed_secs"
        )?;

        Ok(Self {
            writer,
            start_time: Instant::now(),
        })
    }

    /// Reset the start time.
    pub fn reset_timer(&mut self) {
        self.start_time = Instant::now();
    }
}

impl MetricsLogger for CsvLogger {
    fn log(&mut self, snapshot: &RoundSnapshot) {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let critic = snapshot
            .critic_loss
            .map(|loss| loss.to_string())
            .unwrap_or_default();

        let _ = writeln!(
            self.writer,
            "{},{},{},{},{:.4},{:.6},{},{:.6},{:.4},{:.2}",
            snapshot.round,
            snapshot.epoch,
            snapshot.trajectories,
            snapshot.env_steps,
            snapshot.avg_reward,
            snapshot.policy_loss,
            critic,
            snapshot.entropy,
            snapshot.entropy_weight,
            elapsed
        );
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl Drop for CsvLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Multi-logger that writes to multiple backends.
pub struct MultiLogger {
    loggers: Vec<Box<dyn MetricsLogger>>,
}

impl MultiLogger {
    /// Create a new multi-logger.
    pub fn new() -> Self {
        Self {
            loggers: Vec::new(),
        }
    }

    /// Add a logger.
    pub fn add<L: MetricsLogger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Box::new(logger));
        self
    }
}

impl Default for MultiLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsLogger for MultiLogger {
    fn log(&mut self, snapshot: &RoundSnapshot) {
        for logger in &mut self.loggers {
            logger.log(snapshot);
        }
    }

    fn flush(&mut self) {
        for logger in &mut self.loggers {
            logger.flush();
        }
    }
}
