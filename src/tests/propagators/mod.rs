mod capacity;
mod cardinality;
mod colocation;
mod conflict;
mod implication;
mod linking;
mod require_provide;
mod slot_ordering;
mod slot_usage;
