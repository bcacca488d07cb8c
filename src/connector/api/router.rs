use anyhow::Result;

use crate::{Commands, IndexCommands};

use super::container::Container;
use super::controller::{IndexController, PlanController};

pub struct Router<'a> {
    plan_controller: PlanController<'a>,
    index_controller: IndexController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            plan_controller: PlanController::new(container),
            index_controller: IndexController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Plan { destination } => self.plan_controller.plan(destination).await,
            Commands::Index(IndexCommands::Stats) => self.index_controller.stats().await,
            Commands::Index(IndexCommands::Upsert { file }) => {
                self.index_controller.upsert(&file).await
            }
            Commands::Index(IndexCommands::Query { vector, top_k }) => {
                self.index_controller.query(vector, top_k).await
            }
            Commands::Tui => anyhow::bail!("the interactive planner runs outside the router"),
        }
    }
}
