// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Parallel compilation of independent sources.
//!
//! Each source gets its own [`Session`], so nothing is shared between
//! workers and results come back in input order.

use rayon::prelude::*;

use crate::ast::AstRoot;
use crate::error::Result;
use crate::parser;
use crate::session::{Compilation, CompileOptions, Session};

/// Compiles sources on a dedicated thread pool.
pub struct ParallelCompiler {
    /// Thread pool for CPU-bound work
    pool: rayon::ThreadPool,
}

impl ParallelCompiler {
    /// Creates a compiler with the default number of threads.
    pub fn new() -> std::result::Result<Self, rayon::ThreadPoolBuildError> {
        Ok(Self {
            pool: rayon::ThreadPoolBuilder::new().build()?,
        })
    }

    /// Creates a compiler with a specific number of threads.
    pub fn with_threads(num_threads: usize) -> std::result::Result<Self, rayon::ThreadPoolBuildError> {
        Ok(Self {
            pool: rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()?,
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Compiles every source, returning one result per source in order.
    pub fn compile(&self, sources: &[&str], options: &CompileOptions) -> Vec<Result<Compilation>> {
        self.pool.install(|| compile_parallel(sources, options))
    }

    /// Parses every source, returning one tree per source in order.
    pub fn parse(&self, sources: &[&str]) -> Vec<Result<AstRoot>> {
        self.pool
            .install(|| sources.par_iter().map(|source| parser::parse(source)).collect())
    }
}

/// Compiles every source on the global rayon pool.
pub fn compile_parallel(sources: &[&str], options: &CompileOptions) -> Vec<Result<Compilation>> {
    tracing::debug!(sources = sources.len(), "compiling in parallel");
    sources
        .par_iter()
        .map(|source| Session::new(options.clone()).compile(source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::disassemble;

    #[test]
    fn test_results_keep_input_order() {
        let sources = ["x = 1", "fn f() { }", "(", "y = 'two'"];
        let results = compile_parallel(&sources, &CompileOptions::default());
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().map(|c| c.module.functions().count()).ok(), Some(1));
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_matches_sequential_output() {
        let sources = ["a = 1; b = a and 2", "fn g(x: Int) { x }", "[1, 2.5, 'three']"];
        let compiler = ParallelCompiler::with_threads(2).unwrap();
        assert_eq!(compiler.threads(), 2);

        let parallel = compiler.compile(&sources, &CompileOptions::default());
        for (source, result) in sources.iter().zip(parallel) {
            let sequential = crate::session::compile(source).unwrap();
            assert_eq!(
                disassemble(&result.unwrap().module),
                disassemble(&sequential.module)
            );
        }
    }

    #[test]
    fn test_parse_in_pool() {
        let compiler = ParallelCompiler::with_threads(1).unwrap();
        let trees = compiler.parse(&["1", "2; 3"]);
        assert_eq!(trees[1].as_ref().map(|t| t.statements.len()).ok(), Some(2));
    }
}
