//! The decision policy trait and the descriptor-driven factory.

use volley_core::{Action, PolicySpec};

use crate::observation::Observation;
use crate::smart::SmartPolicy;

/// A tank decision policy.
///
/// Called once per decision tick with a fresh [`Observation`]; returns
/// the action the tank should take until the next decision. Policies
/// run on dedicated worker threads, so they must be `Send`; they keep
/// whatever state they like between calls.
pub trait Policy: Send {
    /// Decide the next action from a world snapshot.
    fn decide(&mut self, obs: &Observation) -> Action;
}

/// Build the policy a descriptor asks for.
///
/// Every policy kind currently routes to [`SmartPolicy`]; the payload's
/// behaviour tag carries the actual variation. `seed` must be unique
/// per tank and derived from the match seed so decisions reproduce.
pub fn build_policy(spec: &PolicySpec, seed: u64) -> Box<dyn Policy> {
    // RuleSet, Fsm, and LlmHint are descriptor vocabulary; the hosted
    // implementation behind all three is the behaviour-profile policy.
    Box::new(SmartPolicy::new(&spec.payload, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use volley_core::{BehaviorTag, PolicyKind, PolicyPayload};

    #[test]
    fn factory_accepts_every_kind() {
        for kind in [PolicyKind::RuleSet, PolicyKind::Fsm, PolicyKind::LlmHint] {
            let spec = PolicySpec {
                kind,
                payload: PolicyPayload {
                    behavior: BehaviorTag::Balanced,
                    ..PolicyPayload::default()
                },
            };
            let _policy = build_policy(&spec, 1);
        }
    }
}
