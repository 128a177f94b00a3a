mod density_mixture;
mod density_pure;
mod parameters;
mod refinement;
