use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::toast::Toasts;

/// Active events are day-scoped; anything older is pruned on load.
pub const EVENT_LIFETIME_HOURS: i64 = 24;

pub struct EventDef {
    pub kind: &'static str,
    pub message: &'static str,
    pub probability: f64,
}

pub const EVENT_TABLE: &[EventDef] = &[
    EventDef {
        kind: "market_shift",
        message: "Market prices are fluctuating! Investments may yield higher returns today.",
        probability: 0.3,
    },
    EventDef {
        kind: "tax_day",
        message: "Tax Day! All transactions have a 5% fee today.",
        probability: 0.1,
    },
    EventDef {
        kind: "bonus_day",
        message: "Economic Boom! All earnings are increased by 10% today.",
        probability: 0.2,
    },
    EventDef {
        kind: "sale_day",
        message: "Flash Sale! Some items in the shop are discounted today.",
        probability: 0.25,
    },
    EventDef {
        kind: "investment_opportunity",
        message: "Special investment opportunity available! Check the investments page.",
        probability: 0.15,
    },
    EventDef {
        kind: "lottery_announcement",
        message: "Guild Lottery is open! Buy tickets for a chance to win big.",
        probability: 0.2,
    },
    EventDef {
        kind: "bonus_quest",
        message: "Bonus quest available with extra rewards! Check your quest log.",
        probability: 0.3,
    },
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: String,
    pub message: String,
    pub started: DateTime<Utc>,
}

impl ActiveEvent {
    pub fn expires(&self) -> DateTime<Utc> {
        self.started + Duration::hours(EVENT_LIFETIME_HOURS)
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires() - now).max(Duration::zero())
    }
}

/// Economy events ticker: on startup either re-announces the persisted
/// active events or rolls for one new one.
pub struct EconomyEvents {
    active: Vec<ActiveEvent>,
    path: PathBuf,
}

impl EconomyEvents {
    pub fn load(path: PathBuf) -> Self {
        let mut active = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<ActiveEvent>>(&raw) {
                Ok(events) => events,
                Err(e) => {
                    warn!(path = %path.display(), "stored events unreadable ({e}), starting fresh");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        let now = Utc::now();
        let before = active.len();
        active.retain(|e| e.expires() > now);
        let events = EconomyEvents { active, path };
        if events.active.len() != before {
            events.persist();
        }
        events
    }

    pub fn active(&self) -> &[ActiveEvent] {
        &self.active
    }

    /// Startup check: existing events are re-announced; with none active,
    /// one new event may trigger behind its probability gate.
    pub fn check_for_events(&mut self, toasts: &mut Toasts, now: Instant) {
        if self.active.is_empty() {
            if let Some(event) = self.trigger_from(EVENT_TABLE, &mut rand::rng(), Utc::now()) {
                info!(kind = %event.kind, "economy event triggered");
                toasts.event(event.message.clone(), now);
            }
        } else {
            for event in &self.active {
                toasts.event(event.message.clone(), now);
            }
        }
    }

    /// Probability-gates every definition, then picks uniformly among the
    /// ones that passed. The new event is persisted before it is returned.
    fn trigger_from<R: Rng>(
        &mut self,
        table: &[EventDef],
        rng: &mut R,
        at: DateTime<Utc>,
    ) -> Option<&ActiveEvent> {
        let gated: Vec<&EventDef> = table
            .iter()
            .filter(|def| rng.random_bool(def.probability))
            .collect();
        let def = gated.choose(rng)?;
        self.active.push(ActiveEvent {
            kind: def.kind.to_string(),
            message: def.message.to_string(),
            started: at,
        });
        self.persist();
        self.active.last()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.persist();
    }

    fn persist(&self) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(&self.active).expect("events serialize");
            fs::write(&self.path, json)
        };
        if let Err(e) = write() {
            warn!(path = %self.path.display(), "could not persist active events: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALWAYS: &[EventDef] = &[EventDef {
        kind: "always",
        message: "always fires",
        probability: 1.0,
    }];

    const NEVER: &[EventDef] = &[EventDef {
        kind: "never",
        message: "never fires",
        probability: 0.0,
    }];

    #[test]
    fn zero_probability_never_triggers() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = EconomyEvents::load(dir.path().join("events.json"));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(events.trigger_from(NEVER, &mut rng, Utc::now()).is_none());
        }
        assert!(events.active().is_empty());
    }

    #[test]
    fn certain_probability_always_triggers_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut events = EconomyEvents::load(path.clone());
        let mut rng = StdRng::seed_from_u64(7);
        let kind = events
            .trigger_from(ALWAYS, &mut rng, Utc::now())
            .unwrap()
            .kind
            .clone();
        assert_eq!(kind, "always");

        let reloaded = EconomyEvents::load(path);
        assert_eq!(reloaded.active().len(), 1);
        assert_eq!(reloaded.active()[0].kind, "always");
    }

    #[test]
    fn corrupt_event_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        fs::write(&path, "][").unwrap();
        let events = EconomyEvents::load(path);
        assert!(events.active().is_empty());
    }

    #[test]
    fn expired_events_are_pruned_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let stale = vec![ActiveEvent {
            kind: "tax_day".into(),
            message: "old".into(),
            started: Utc::now() - Duration::hours(EVENT_LIFETIME_HOURS + 1),
        }];
        fs::write(&path, serde_json::to_string(&stale).unwrap()).unwrap();

        let events = EconomyEvents::load(path.clone());
        assert!(events.active().is_empty());
        // The pruned list was written back.
        let on_disk: Vec<ActiveEvent> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.is_empty());
    }

    #[test]
    fn clear_empties_list_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut events = EconomyEvents::load(path.clone());
        let mut rng = StdRng::seed_from_u64(1);
        events.trigger_from(ALWAYS, &mut rng, Utc::now()).unwrap();
        events.clear();

        assert!(events.active().is_empty());
        let on_disk: Vec<ActiveEvent> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.is_empty());
    }

    #[test]
    fn remaining_time_never_goes_negative() {
        let event = ActiveEvent {
            kind: "bonus_day".into(),
            message: "boom".into(),
            started: Utc::now() - Duration::hours(EVENT_LIFETIME_HOURS + 5),
        };
        assert_eq!(event.remaining(Utc::now()), Duration::zero());
    }
}
