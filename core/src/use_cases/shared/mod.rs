pub(crate) mod write_phylip_file;
