/*!
rumbo-lib
=====

This crate provides a per-hop output-port selection engine for network-on-chip router models: given the destination and virtual network/channel of a packet, it decides through which physical output port the packet leaves the current router.

It is meant to be embedded in a discrete-event router model. The surrounding simulator owns the pipeline stages, the credit bookkeeping, and the topology construction; this crate only consumes their state through the [routing::RouterEnvironment] trait and the build-time population calls of [routing::RoutingUnit].

# Usage

This crate is `rumbo-lib`. To use it add `rumbo-lib` to your dependencies in your project's `Cargo.toml`.

```toml
[dependencies]
rumbo-lib = "0.1"
```

Then, while building the topology, create one [routing::RoutingUnit] per router and populate its route table and direction maps. At steady state call [routing::RoutingUnit::compute_output_port] for each head flit.

```ignore
let mut unit = RoutingUnit::new(router_index);
for link in output_links
{
	unit.add_route(link.reachable_interfaces);
	unit.add_weight(link.weight);
}
unit.register_outbound(PortDirection::East, 3);
//...
let port = unit.compute_output_port(&environment,&route,virtual_channel,inbound_port,inbound_direction,&mut rng)?;
```

All the selectable algorithms and the escape-virtual-channel override are documented in the [routing] module.

*/

///Mapping between symbolic port directions and port indices.
pub mod direction;
///The available routing algorithms and the dispatching [RoutingUnit](routing::RoutingUnit).
pub mod routing;
pub mod error;
pub mod quantify;

pub use crate::routing::prelude::*;
pub use crate::quantify::Quantifiable;
