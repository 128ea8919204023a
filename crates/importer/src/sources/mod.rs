pub mod unstop;
