pub mod discount_policy;
