use std::fs;
use std::path::Path;

use mec_core::{ErrorInfo, MecError};
use mec_graph::{write_dag_file, Pdag};
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::measure::Measurement;

/// Emission adaptor shared by all enumerators: routes every produced DAG
/// through the measurement sink, keeps the big-integer tally, and
/// optionally writes the DAG to `dag-<k>.txt` under an output directory.
///
/// The sink is invoked before the side effects, so a cancelled emission
/// leaves neither a counted DAG nor a partial file behind; files from
/// earlier, completed emissions may remain.
pub struct Emitter<'a> {
    sink: &'a mut Measurement,
    out_dir: Option<&'a Path>,
    count: BigUint,
}

impl<'a> Emitter<'a> {
    pub fn new(sink: &'a mut Measurement, out_dir: Option<&'a Path>) -> Result<Self, MecError> {
        if let Some(dir) = out_dir {
            fs::create_dir_all(dir).map_err(|err| {
                MecError::Enumerate(
                    ErrorInfo::new("out-dir", err.to_string())
                        .with_context("path", dir.display()),
                )
            })?;
        }
        Ok(Self {
            sink,
            out_dir,
            count: BigUint::zero(),
        })
    }

    pub fn emit(&mut self, dag: &Pdag) -> Result<(), MecError> {
        self.sink.record()?;
        self.count += BigUint::one();
        if let Some(dir) = self.out_dir {
            let path = dir.join(format!("dag-{}.txt", self.count));
            write_dag_file(&path, dag)?;
        }
        Ok(())
    }

    pub fn into_count(self) -> BigUint {
        self.count
    }
}
