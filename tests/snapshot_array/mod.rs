pub(crate) mod strategy;
