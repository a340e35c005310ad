mod aggregation;
mod reconciliation;
