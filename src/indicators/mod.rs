pub mod momentum;
pub mod trend;
