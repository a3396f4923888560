pub mod pinata;
