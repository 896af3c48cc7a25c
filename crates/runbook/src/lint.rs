// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-flight checks over an expanded job list
//!
//! Findings are advisory: the scheduler logs them and runs anyway.

use pj_core::ConcreteJob;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// `input` names a job (or output alias) that only runs later
    ForwardInput { job: String, input: String },
    DuplicateName { job: String },
    /// `depends_on` names nothing in the list
    UnknownDependency { job: String, dependency: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::ForwardInput { job, input } => write!(
                f,
                "job '{job}' reads input '{input}', which is produced by a later job"
            ),
            Finding::DuplicateName { job } => write!(f, "job name '{job}' appears more than once"),
            Finding::UnknownDependency { job, dependency } => {
                write!(f, "job '{job}' depends on unknown job '{dependency}'")
            }
        }
    }
}

pub fn lint(jobs: &[ConcreteJob]) -> Vec<Finding> {
    let mut findings = Vec::new();

    let mut names = HashSet::new();
    for job in jobs {
        if !names.insert(job.name()) {
            findings.push(Finding::DuplicateName {
                job: job.name().to_string(),
            });
        }
    }

    let known: HashSet<&str> = jobs
        .iter()
        .flat_map(|j| [j.name(), j.origin.as_str()])
        .collect();

    for (i, job) in jobs.iter().enumerate() {
        if let Some(input) = job.job.input.as_deref() {
            let earlier = jobs[..i].iter().any(|j| produces(j, input));
            let later = jobs[i + 1..].iter().any(|j| produces(j, input));
            if later && !earlier {
                findings.push(Finding::ForwardInput {
                    job: job.name().to_string(),
                    input: input.to_string(),
                });
            }
        }
        for dependency in &job.job.depends_on {
            if !known.contains(dependency.as_str()) {
                findings.push(Finding::UnknownDependency {
                    job: job.name().to_string(),
                    dependency: dependency.clone(),
                });
            }
        }
    }

    findings
}

fn produces(job: &ConcreteJob, name: &str) -> bool {
    job.name() == name || job.job.output.as_deref() == Some(name)
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
