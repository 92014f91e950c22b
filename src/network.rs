// The airline network: route graph and account directory shared by the menu layer.
// Each structure sits behind its own lock; the structures themselves are not thread-safe.

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::debug;

use crate::account::Account;
use crate::airport::Airport;
use crate::booking::{Quote, Wallet};
use crate::config::NetworkConfig;
use crate::directory::AccountTable;
use crate::graph::Graph;
use crate::linked_list::Weight;

pub const SAMPLE_ROUTES: &str = include_str!("../data/mexico_routes.json");

#[derive(Debug, Deserialize)]
pub struct RouteSeed {
    pub airports: Vec<Airport>,
    pub routes: Vec<SeedRoute>,
}

#[derive(Debug, Deserialize)]
pub struct SeedRoute {
    pub from: i32,
    pub to: i32,
    pub distance: Weight,
}

impl RouteSeed {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse route seed")
    }

    pub fn apply(&self, graph: &mut Graph) -> Result<()> {
        for airport in &self.airports {
            graph
                .add_airport(airport.clone())
                .with_context(|| format!("failed to add airport {}", airport.code))?;
        }
        for route in &self.routes {
            graph
                .add_weighted_edge(route.from, route.to, route.distance)
                .with_context(|| format!("failed to add route {} -> {}", route.from, route.to))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AirlineNetwork {
    config: NetworkConfig,
    routes: Arc<RwLock<Graph>>,
    accounts: Arc<RwLock<AccountTable>>,
}

impl AirlineNetwork {
    pub fn new(config: NetworkConfig) -> Result<Self> {
        config.validate().context("invalid network config")?;

        let graph = Graph::new(config.max_airports, config.graph_kind)?;
        let accounts = AccountTable::new(config.directory_capacity)?;

        Ok(Self {
            config,
            routes: Arc::new(RwLock::new(graph)),
            accounts: Arc::new(RwLock::new(accounts)),
        })
    }

    // Network preloaded with the bundled Mexican airports and routes.
    pub fn with_sample_routes(config: NetworkConfig) -> Result<Self> {
        let network = Self::new(config)?;
        network.seed(SAMPLE_ROUTES)?;
        Ok(network)
    }

    pub fn seed(&self, json: &str) -> Result<()> {
        let seed = RouteSeed::from_json(json)?;
        seed.apply(&mut self.routes.write())?;
        debug!(
            airports = seed.airports.len(),
            routes = seed.routes.len(),
            "route graph seeded"
        );
        Ok(())
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn routes(&self) -> &RwLock<Graph> {
        &self.routes
    }

    pub fn accounts(&self) -> &RwLock<AccountTable> {
        &self.accounts
    }

    pub fn register(&self, account: Account) -> Result<usize> {
        let name = account.name.clone();
        self.accounts
            .write()
            .insert(account)
            .with_context(|| format!("failed to register {name}"))
    }

    // Returns a copy of the authenticated account.
    pub fn log_in(&self, name: &str, password: &str) -> Result<Account> {
        let accounts = self.accounts.read();
        let account = accounts.authenticate(name, password)?;
        Ok(account.clone())
    }

    pub fn delete_account(&self, name: &str) -> Option<Account> {
        self.accounts.write().remove(name)
    }

    pub fn quote(&self, from_code: &str, to_code: &str) -> Result<Quote> {
        Ok(Quote::between(&self.routes.read(), from_code, to_code)?)
    }

    pub fn new_wallet(&self) -> Result<Wallet> {
        Ok(Wallet::new(self.config.wallet_capacity)?)
    }
}
