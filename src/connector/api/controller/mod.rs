pub mod index_controller;
pub mod plan_controller;

pub use index_controller::IndexController;
pub use plan_controller::PlanController;
