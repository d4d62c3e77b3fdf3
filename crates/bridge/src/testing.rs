//! Scripted host engine for tests and examples.
//!
//! [`ScriptedEngine`] stands in for the opaque host: it owns a creature
//! table, honors [`HostEngine`] attach/detach, and simulates the native call
//! sites: the attached handler runs first, and the "native body" (applying
//! possibly-mutated damage, recording the values the engine's own logic
//! would have used) runs only when the pre-empt decision allows it.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use sim_core::{CreatureOracle, CreatureSnapshot, EntityId, NativeVector, RawHandle};

use crate::commands::CommandSink;
use crate::engine::{
    AttackActorArgs, AttackPointArgs, CallSite, DamageArgs, DeadArgs, FleeArgs, HostEngine,
    NotifyCall, PreemptCall, SiteHandler, SpawnArgs,
};
use crate::error::{CommandError, HookError};

/// Engine-owned creature table, shared between the scripted engine and the
/// oracle side of the bridge.
#[derive(Default)]
pub struct CreatureTable {
    creatures: Mutex<HashMap<u64, CreatureSnapshot>>,
    next: AtomicU64,
}

impl CreatureTable {
    /// Adds a creature at full health and returns its handle.
    pub fn insert_creature(&self, health: u16, position: NativeVector) -> RawHandle {
        let raw = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = CreatureSnapshot {
            id: EntityId(raw as u32),
            health,
            max_health: health,
            position,
            dead: health == 0,
        };
        self.creatures
            .lock()
            .expect("creature table lock")
            .insert(raw, snapshot);
        RawHandle(raw)
    }

    fn update(&self, handle: RawHandle, apply: impl FnOnce(&mut CreatureSnapshot)) {
        if let Some(snapshot) = self
            .creatures
            .lock()
            .expect("creature table lock")
            .get_mut(&handle.0)
        {
            apply(snapshot);
        }
    }
}

impl CreatureOracle for CreatureTable {
    fn snapshot(&self, handle: RawHandle) -> Option<CreatureSnapshot> {
        self.creatures
            .lock()
            .expect("creature table lock")
            .get(&handle.0)
            .copied()
    }
}

/// In-memory host engine with scriptable call sites.
pub struct ScriptedEngine {
    creatures: Arc<CreatureTable>,
    handlers: HashMap<CallSite, SiteHandler>,
    missing: HashSet<CallSite>,
    registered_commands: HashSet<String>,
    /// Commands the engine executed: (issuer, name, args).
    pub commands: Vec<(u64, String, String)>,
    /// Values the native damage body last ran with.
    pub last_damage: Option<DamageArgs>,
    /// Values the native flee body last ran with.
    pub last_flee: Option<FleeArgs>,
    /// Values the native attack-point body last ran with.
    pub last_attack_point: Option<AttackPointArgs>,
    /// Values the native attack-actor body last ran with.
    pub last_attack_actor: Option<AttackActorArgs>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            creatures: Arc::new(CreatureTable::default()),
            handlers: HashMap::new(),
            missing: HashSet::new(),
            registered_commands: HashSet::new(),
            commands: Vec::new(),
            last_damage: None,
            last_flee: None,
            last_attack_point: None,
            last_attack_actor: None,
        }
    }

    /// Shared creature table, used as the bridge's oracle.
    pub fn creatures(&self) -> Arc<CreatureTable> {
        Arc::clone(&self.creatures)
    }

    pub fn attached_sites(&self) -> Vec<CallSite> {
        self.handlers.keys().copied().collect()
    }

    /// Simulates an engine build that lacks `site`; attaching to it fails
    /// with [`HookError::SiteNotFound`].
    pub fn disable_site(&mut self, site: CallSite) {
        self.missing.insert(site);
    }

    /// Makes `name` executable through [`CommandSink`].
    pub fn register_command(&mut self, name: impl Into<String>) {
        self.registered_commands.insert(name.into());
    }

    /// Native spawn: adds the creature, then reports it.
    pub fn spawn(&mut self, health: u16, position: NativeVector) -> RawHandle {
        let handle = self.creatures.insert_creature(health, position);
        self.fire_notify(
            CallSite::Spawned,
            NotifyCall::Spawned(SpawnArgs { creature: handle }),
        );
        handle
    }

    /// Native revive: restores full health, then reports it.
    pub fn revive(&mut self, handle: RawHandle) {
        self.creatures.update(handle, |c| {
            c.health = c.max_health;
            c.dead = false;
        });
        self.fire_notify(
            CallSite::Revived,
            NotifyCall::Revived(SpawnArgs { creature: handle }),
        );
    }

    /// Native damage entry.
    ///
    /// Runs the pre-empt handler, then applies the (possibly mutated) damage
    /// when allowed. A creature reaching zero health dies and is reported
    /// through the dead site. Returns whether the native body ran.
    pub fn ask_damage(&mut self, args: DamageArgs) -> bool {
        let mut call = PreemptCall::Damage(args);
        if !self.run_preempt(CallSite::Damage, &mut call) {
            return false;
        }
        let PreemptCall::Damage(args) = call else {
            return false;
        };

        self.last_damage = Some(args);
        let mut died = false;
        self.creatures.update(args.creature, |c| {
            c.health = c.health.saturating_sub(args.amount);
            if c.health == 0 && !c.dead {
                c.dead = true;
                died = true;
            }
        });

        if died {
            self.fire_notify(
                CallSite::Dead,
                NotifyCall::Dead(DeadArgs {
                    creature: args.creature,
                    ragdoll: args.ragdoll,
                    ragdoll_effect: args.ragdoll_effect,
                }),
            );
        }
        true
    }

    /// Native flee entry. Returns whether the native body ran.
    pub fn alert_direction(&mut self, args: FleeArgs) -> bool {
        let mut call = PreemptCall::Flee(args);
        if !self.run_preempt(CallSite::Flee, &mut call) {
            return false;
        }
        let PreemptCall::Flee(args) = call else {
            return false;
        };
        self.last_flee = Some(args);
        true
    }

    /// Native attack-point entry. Returns whether the native body ran.
    pub fn alert_go_to_point(&mut self, args: AttackPointArgs) -> bool {
        let mut call = PreemptCall::AttackPoint(args);
        if !self.run_preempt(CallSite::AttackPoint, &mut call) {
            return false;
        }
        let PreemptCall::AttackPoint(args) = call else {
            return false;
        };
        self.last_attack_point = Some(args);
        true
    }

    /// Native attack-actor entry. Returns whether the native body ran.
    pub fn alert_actor(&mut self, args: AttackActorArgs) -> bool {
        let mut call = PreemptCall::AttackActor(args);
        if !self.run_preempt(CallSite::AttackActor, &mut call) {
            return false;
        }
        let PreemptCall::AttackActor(args) = call else {
            return false;
        };
        self.last_attack_actor = Some(args);
        true
    }

    fn fire_notify(&self, site: CallSite, call: NotifyCall) {
        if let Some(SiteHandler::Notify(handler)) = self.handlers.get(&site) {
            handler(&call);
        }
    }

    fn run_preempt(&self, site: CallSite, call: &mut PreemptCall) -> bool {
        match self.handlers.get(&site) {
            Some(SiteHandler::Preempt(handler)) => handler(call),
            _ => true,
        }
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEngine for ScriptedEngine {
    fn attach(&mut self, site: CallSite, handler: SiteHandler) -> Result<(), HookError> {
        if self.missing.contains(&site) {
            return Err(HookError::SiteNotFound(site));
        }
        if self.handlers.contains_key(&site) {
            return Err(HookError::AlreadyInstalled);
        }
        self.handlers.insert(site, handler);
        Ok(())
    }

    fn detach(&mut self, site: CallSite) -> Result<(), HookError> {
        self.handlers.remove(&site);
        Ok(())
    }
}

impl CommandSink for ScriptedEngine {
    fn run_command(&mut self, issuer: u64, name: &str, args: &str) -> Result<(), CommandError> {
        if !self.registered_commands.contains(name) {
            return Err(CommandError::UnknownCommand(name.to_string()));
        }
        self.commands
            .push((issuer, name.to_string(), args.to_string()));
        Ok(())
    }
}
