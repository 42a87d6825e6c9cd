pub mod library_seed;
