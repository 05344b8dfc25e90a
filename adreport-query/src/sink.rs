// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Consumers of report output

use crate::engine::ViewOutput;
use adreport_core::Result;

/// Receives finished views in view order.
///
/// Rows inside a [`ViewOutput`] are already in their final sort order; a
/// sink must not reorder them.
pub trait ReportSink {
    fn emit(&mut self, output: &ViewOutput) -> Result<()>;

    /// Called once after the last view.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects outputs in memory
impl ReportSink for Vec<ViewOutput> {
    fn emit(&mut self, output: &ViewOutput) -> Result<()> {
        self.push(output.clone());
        Ok(())
    }
}
