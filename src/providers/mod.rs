pub mod brightbox;
