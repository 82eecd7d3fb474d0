use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::kernel::theorem::Theorem;
use crate::theory::Theory;

/// A derivation written out as numbered lines.
/// Each line is "sequent by rule", followed by the numbers of the lines it cites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Certificate {
    /// The name the theorem was recorded under
    pub name: String,

    /// The proved sequent
    pub conclusion: String,

    /// The inferences, premises before conclusions. The last line proves the conclusion.
    pub steps: Vec<String>,
}

impl Certificate {
    /// Flattens the derivation of a theorem.
    /// A premise shared by several inferences is written once.
    pub fn new(name: &str, theorem: &Theorem) -> Certificate {
        let mut numbers: HashMap<usize, usize> = HashMap::new();
        let mut steps = vec![];

        // Post-order traversal. The flag marks nodes whose premises are already written.
        let mut stack = vec![(theorem, false)];
        while let Some((current, expanded)) = stack.pop() {
            if numbers.contains_key(&current.id()) {
                continue;
            }
            if !expanded {
                stack.push((current, true));
                for premise in current.premises().iter().rev() {
                    stack.push((premise, false));
                }
                continue;
            }
            let cited: Vec<String> = current
                .premises()
                .iter()
                .filter_map(|p| numbers.get(&p.id()))
                .map(|n| n.to_string())
                .collect();
            let mut line = format!("{}. {} by {}", steps.len() + 1, current.sequent(), current.rule());
            if !cited.is_empty() {
                line.push_str(&format!(" from {}", cited.join(", ")));
            }
            numbers.insert(current.id(), steps.len() + 1);
            steps.push(line);
        }

        Certificate {
            name: name.to_string(),
            conclusion: theorem.sequent().to_string(),
            steps,
        }
    }
}

/// A collection of certificates that can be saved to a file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CertificateStore {
    pub certs: Vec<Certificate>,
}

impl CertificateStore {
    /// One certificate per recorded theorem, in the order they were recorded.
    pub fn from_theory(theory: &Theory) -> CertificateStore {
        CertificateStore {
            certs: theory
                .theorems()
                .map(|(name, theorem)| Certificate::new(name, theorem))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Certificate> {
        self.certs.iter().find(|cert| cert.name == name)
    }

    /// Load a certificate store from a file in JSONL format (one certificate per line)
    pub fn load(filename: &Path) -> Result<CertificateStore, Box<dyn Error>> {
        let file = File::open(filename)?;
        let reader = BufReader::new(file);
        let mut certs = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                let cert: Certificate = serde_json::from_str(&line)?;
                certs.push(cert);
            }
        }

        Ok(CertificateStore { certs })
    }

    /// Save the certificate store to a file in JSONL format (one certificate per line)
    pub fn save(&self, filename: &Path) -> Result<(), Box<dyn Error>> {
        let file = File::create(filename)?;
        let mut writer = BufWriter::new(file);

        for cert in &self.certs {
            let json = serde_json::to_string(cert)?;
            writeln!(writer, "{}", json)?;
        }

        writer.flush()?;
        Ok(())
    }
}
