//! Unit tests for crop plan loading

mod builtin_plan_tests;
mod crop_plan_tests;
