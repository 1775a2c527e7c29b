pub(crate) mod run_programs;
