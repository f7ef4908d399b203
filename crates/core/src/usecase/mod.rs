pub mod booster;
