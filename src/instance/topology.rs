//! Application topologies whose placement rules are fixed by the application itself. Only the
//! slot pool and the offer catalogue vary between instances of the same topology.

use super::Comparison;
use super::Component;
use super::PlacementRule;
use super::ProblemInstance;
use super::VmOffer;

/// The requirement dimensions used by the built-in topologies.
pub const DIMENSIONS: [&str; 3] = ["cpu", "memory", "storage"];

pub const BALANCER: &str = "Balancer";
pub const APACHE: &str = "Apache";
pub const NGINX: &str = "Nginx";
pub const IDS_SERVER: &str = "IDSServer";
pub const IDS_AGENT: &str = "IDSAgent";

/// The Secure Web Container application.
///
/// A single load balancer fronts at least three web servers, each of which is either Apache or
/// Nginx. Every web server is monitored by an intrusion detection agent running next to it, and
/// each IDS server can handle at most ten agents.
pub fn secure_web_container(
    num_slots: usize,
    offers: impl IntoIterator<Item = VmOffer>,
) -> ProblemInstance {
    let mut instance = ProblemInstance::new(num_slots, DIMENSIONS);

    for offer in offers {
        let _ = instance.add_offer(offer);
    }

    let balancer = instance.add_component(Component::new(BALANCER, [4, 2048, 500]));
    let apache = instance.add_component(Component::new(APACHE, [2, 512, 1000]));
    let nginx = instance.add_component(Component::new(NGINX, [2, 1024, 1000]));
    let ids_server = instance.add_component(Component::new(IDS_SERVER, [8, 16000, 2000]));
    let ids_agent = instance.add_component(Component::new(IDS_AGENT, [1, 256, 250]));

    instance.add_rule(PlacementRule::Cardinality {
        components: vec![balancer],
        comparison: Comparison::Equal,
        bound: 1,
    });
    instance.add_rule(PlacementRule::Cardinality {
        components: vec![apache, nginx],
        comparison: Comparison::AtLeast,
        bound: 3,
    });

    instance.add_rule(PlacementRule::Conflict {
        component: balancer,
        conflicting: vec![apache, nginx, ids_server, ids_agent],
    });
    instance.add_rule(PlacementRule::Conflict {
        component: apache,
        conflicting: vec![nginx],
    });
    instance.add_rule(PlacementRule::Conflict {
        component: ids_server,
        conflicting: vec![apache, nginx, ids_agent],
    });

    instance.add_rule(PlacementRule::Colocation {
        dependent: ids_agent,
        primaries: vec![apache, nginx],
    });

    instance.add_rule(PlacementRule::provide(ids_server, ids_agent, 10));
    instance.add_rule(PlacementRule::requires(ids_agent, ids_server));

    instance
}

/// A small catalogue of general purpose offers, in the dimensions of [`DIMENSIONS`]. Prices are in
/// cents per hour.
pub fn general_purpose_offers() -> Vec<VmOffer> {
    vec![
        VmOffer::new("m.large", [2, 7500, 4000], 140),
        VmOffer::new("m.xlarge", [4, 15000, 4000], 280),
        VmOffer::new("m.2xlarge", [8, 30000, 4000], 560),
        VmOffer::new("c.xlarge", [8, 7000, 4000], 520),
        VmOffer::new("r.xlarge", [4, 30500, 4000], 350),
        VmOffer::new("r.2xlarge", [8, 61000, 4000], 700),
    ]
}
