//! Simulation report generation.

use super::runner::{RunOutcome, RunStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from a batch of runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub wins: u32,
    pub out_of_steps: u32,
    pub stuck: u32,
    pub timed_out: u32,

    // Aggregated stats
    pub win_rate: f64,
    pub avg_steps_left: f64,
    pub avg_steps_left_on_win: f64,
    pub avg_rooms_placed: f64,
    pub avg_max_depth: f64,
    pub avg_doors_unlocked: f64,
    pub avg_keys_spent_on_doors: f64,
    pub avg_gems_spent: f64,
    pub avg_rerolls: f64,
    pub avg_interactions: f64,

    // Draft analysis
    pub avg_drafts_offered: f64,
    pub avg_drafts_cancelled: f64,
    pub drafts_unavailable: u32,
    pub avg_pool_size: f64,
    pub min_pool_size: usize,

    /// Number of runs by deepest row reached.
    pub depth_distribution: BTreeMap<usize, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: RunOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;
        let wins = count(RunOutcome::Won);

        let won: Vec<RunStats> = runs
            .iter()
            .filter(|r| r.outcome == RunOutcome::Won)
            .cloned()
            .collect();

        let pool_sizes: Vec<usize> = runs.iter().flat_map(|r| r.pool_sizes.iter().copied()).collect();
        let avg_pool_size = if pool_sizes.is_empty() {
            0.0
        } else {
            pool_sizes.iter().sum::<usize>() as f64 / pool_sizes.len() as f64
        };

        let mut depth_distribution = BTreeMap::new();
        for run in &runs {
            *depth_distribution.entry(run.max_depth).or_insert(0) += 1;
        }

        Self {
            num_runs,
            wins,
            out_of_steps: count(RunOutcome::OutOfSteps),
            stuck: count(RunOutcome::Stuck),
            timed_out: count(RunOutcome::TimedOut),
            win_rate: wins as f64 / num_runs.max(1) as f64,
            avg_steps_left: average(&runs, |r| r.steps_left as f64),
            avg_steps_left_on_win: average(&won, |r| r.steps_left as f64),
            avg_rooms_placed: average(&runs, |r| r.rooms_placed as f64),
            avg_max_depth: average(&runs, |r| r.max_depth as f64),
            avg_doors_unlocked: average(&runs, |r| r.doors_unlocked as f64),
            avg_keys_spent_on_doors: average(&runs, |r| r.keys_spent_on_doors as f64),
            avg_gems_spent: average(&runs, |r| r.gems_spent as f64),
            avg_rerolls: average(&runs, |r| r.rerolls as f64),
            avg_interactions: average(&runs, |r| r.interactions as f64),
            avg_drafts_offered: average(&runs, |r| r.drafts_offered as f64),
            avg_drafts_cancelled: average(&runs, |r| r.drafts_cancelled as f64),
            drafts_unavailable: runs.iter().map(|r| r.drafts_unavailable).sum(),
            avg_pool_size,
            min_pool_size: pool_sizes.iter().copied().min().unwrap_or(0),
            depth_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} won, {} out of steps, {} stuck, {} timed out\n\n",
            self.num_runs, self.wins, self.out_of_steps, self.stuck, self.timed_out
        ));

        report.push_str("── EXPLORATION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Avg Steps Left:      {:.1}\n", self.avg_steps_left));
        report.push_str(&format!(
            "  Avg Steps Left (win): {:.1}\n",
            self.avg_steps_left_on_win
        ));
        report.push_str(&format!("  Avg Rooms Placed:    {:.1}\n", self.avg_rooms_placed));
        report.push_str(&format!("  Avg Max Depth:       {:.1}\n\n", self.avg_max_depth));

        report.push_str("── DOORS & RESOURCES ────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Doors Unlocked:  {:.1}\n", self.avg_doors_unlocked));
        report.push_str(&format!(
            "  Avg Keys on Doors:   {:.1}\n",
            self.avg_keys_spent_on_doors
        ));
        report.push_str(&format!("  Avg Gems Spent:      {:.1}\n", self.avg_gems_spent));
        report.push_str(&format!("  Avg Interactions:    {:.1}\n\n", self.avg_interactions));

        report.push_str("── DRAFTS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Drafts Offered:  {:.1}\n", self.avg_drafts_offered));
        report.push_str(&format!("  Avg Drafts Cancelled: {:.1}\n", self.avg_drafts_cancelled));
        report.push_str(&format!("  Avg Rerolls:         {:.2}\n", self.avg_rerolls));
        report.push_str(&format!("  Avg Pool Size:       {:.1}\n", self.avg_pool_size));
        report.push_str(&format!("  Min Pool Size:       {}\n", self.min_pool_size));
        report.push_str(&format!("  Empty Pools:         {}\n\n", self.drafts_unavailable));

        report.push_str("── DEPTH REACHED ────────────────────────────────────────────────\n");
        for (depth, runs) in &self.depth_distribution {
            let pct = (*runs as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Depth {:2}: {:>5.1}% {}\n", depth, pct, bar));
        }

        if self.stuck > 0 {
            report.push_str(&format!(
                "\n  ⚠️  {} runs got stuck with no usable door\n",
                self.stuck
            ));
        }
        if self.timed_out > 0 {
            report.push_str(&format!(
                "  ⚠️  {} runs hit the action limit\n",
                self.timed_out
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
