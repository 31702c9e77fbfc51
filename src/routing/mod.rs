
/*!

Per-hop output-port selection for a network-on-chip router.

The [RoutingUnit] is the sole steady-state entry point of this crate: for every head flit entering the router the pipeline calls [RoutingUnit::compute_output_port] and receives the index of the output port the packet must leave through. Which rule produces that index depends on the algorithm configured for the whole network, with an override for escape virtual channels:

* `Table`: resolve by the per-router [WeightedRouteTable], built during topology construction.
* `XY`, `TurnModel`, `Random`, `AdaptiveWestFirst`, `AdaptiveRandom`: the mesh strategies of the [mesh] module, which work from router coordinates instead of tables.
* `EscapeVcRandom`, `EscapeVcAdaptiveRandom`: two-tier configurations. Packets on the escape channel of their virtual network are forced onto the deadlock-free [mesh::WestFirstAdaptive] strategy; packets on any other channel use [mesh::QuadrantRandom] or [mesh::QuadrantAdaptive] respectively. The escape channel acts as a safety valve, so the other channels may employ strategies without a deadlock-avoidance guarantee of their own.
* `Custom`: extension point, without implementation in this crate.

Packets whose destination router is the current one are always resolved by table, whatever the configured algorithm: several network interfaces may share the Local direction and only the table distinguishes them.

*/

/// Contains NetworkDestination, WeightedRouteTable.
pub mod table;
/// Contains the mesh strategy family: DimensionOrder, WestFirst, QuadrantRandom, WestFirstAdaptive, QuadrantAdaptive, Custom.
pub mod mesh;

use ::rand::rngs::StdRng;

use quantifiable_derive::Quantifiable;//the derive macro
use crate::quantify::Quantifiable;
use crate::direction::{PortDirection,DirectionMap};
pub use crate::error::Error;
use crate::error;

pub use self::table::{NetworkDestination,WeightedRouteTable};
pub use self::mesh::{MeshRouting,MeshRoutingRecord};

pub mod prelude
{
	pub use super::{RoutingUnit,RouteRequest,RouterEnvironment,RoutingAlgorithm,VirtualChannelContext,CreditOutlook,NetworkDestination,WeightedRouteTable,new_routing_algorithm,Error};
	pub use crate::direction::{PortDirection,DirectionMap};
}

/// The network-wide routing algorithm selection.
/// The two `EscapeVc` variants are resolved per packet into one of the plain variants by [RoutingAlgorithm::with_escape_override] before dispatching.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum RoutingAlgorithm
{
	///Weighted table lookup.
	Table,
	///Dimension-order routing on a mesh.
	XY,
	///West-first turn model on a mesh.
	TurnModel,
	///Uniformly random among the admissible mesh directions.
	Random,
	///West-first with credit-based selection in the eastbound quadrants.
	AdaptiveWestFirst,
	///Credit-based selection in every quadrant.
	AdaptiveRandom,
	///AdaptiveWestFirst on the escape channel, Random elsewhere.
	EscapeVcRandom,
	///AdaptiveWestFirst on the escape channel, AdaptiveRandom elsewhere.
	EscapeVcAdaptiveRandom,
	///Extension point for topology-specific policies.
	Custom,
}

impl RoutingAlgorithm
{
	/// Resolve the escape-channel override: a pre-dispatch transform of the algorithm tag, not a per-strategy branch.
	/// The plain variants pass through unchanged.
	pub fn with_escape_override(self, context:&VirtualChannelContext) -> RoutingAlgorithm
	{
		match self
		{
			RoutingAlgorithm::EscapeVcRandom => if context.is_escape() { RoutingAlgorithm::AdaptiveWestFirst } else { RoutingAlgorithm::Random },
			RoutingAlgorithm::EscapeVcAdaptiveRandom => if context.is_escape() { RoutingAlgorithm::AdaptiveWestFirst } else { RoutingAlgorithm::AdaptiveRandom },
			other => other,
		}
	}
}

///Build a routing algorithm selection from its configuration name.
pub fn new_routing_algorithm(name:&str) -> RoutingAlgorithm
{
	match name
	{
		"TABLE" => RoutingAlgorithm::Table,
		"XY" => RoutingAlgorithm::XY,
		"TURN_MODEL" => RoutingAlgorithm::TurnModel,
		"RANDOM" => RoutingAlgorithm::Random,
		"ADAPT_WF" => RoutingAlgorithm::AdaptiveWestFirst,
		"ADAPT_RANDOM" => RoutingAlgorithm::AdaptiveRandom,
		"ESCAPE_VC_RANDOM" => RoutingAlgorithm::EscapeVcRandom,
		"ESCAPE_VC_ADAPT_RANDOM" => RoutingAlgorithm::EscapeVcAdaptiveRandom,
		"CUSTOM" => RoutingAlgorithm::Custom,
		_ => panic!("Unknown routing algorithm {}",name),
	}
}

/// The routing metadata of a packet, built by the caller for each head flit.
#[derive(Clone,Debug)]
pub struct RouteRequest
{
	///Index of the router the packet is headed to.
	pub destination_router: usize,
	///The virtual network the packet travels on.
	pub virtual_network: usize,
	///The network interfaces the packet may be delivered to.
	pub destination_set: NetworkDestination,
}

/// Where in the virtual-channel range of its network a packet is travelling.
/// Each virtual network owns `channels_per_network` consecutive channels; the first one is its escape channel.
#[derive(Clone,Copy,Debug)]
pub struct VirtualChannelContext
{
	pub virtual_network: usize,
	pub virtual_channel: usize,
	pub channels_per_network: usize,
}

impl VirtualChannelContext
{
	pub fn is_escape(&self) -> bool
	{
		self.virtual_channel == self.virtual_network * self.channels_per_network
	}
}

/// What the routing core reads from the router and network it is embedded in.
/// All of it is read-only for this crate; the credit counters in particular are owned and mutated elsewhere and may change between calls.
pub trait RouterEnvironment
{
	///Number of columns of the mesh. Only consulted by the mesh strategies, which require the topology to actually be a mesh.
	fn mesh_columns(&self) -> usize;
	///Number of rows of the mesh.
	fn mesh_rows(&self) -> usize;
	///The algorithm configured for the whole network.
	fn routing_algorithm(&self) -> RoutingAlgorithm;
	///How many virtual channels each virtual network owns.
	fn virtual_channels_per_network(&self) -> usize;
	///Whether the virtual network preserves packet ordering, restricting table resolution to a deterministic candidate.
	fn is_virtual_network_ordered(&self, virtual_network:usize) -> bool;
	///Credits currently available at the given output port and virtual channel.
	fn credit_count(&self, port:usize, virtual_channel:usize) -> usize;
}

/// Read-only view of the credits downstream of the candidate output ports, taken fresh on every adaptive decision.
/// Public so that implementations of [MeshRouting] outside this crate can make credit-aware choices too.
pub struct CreditOutlook<'a>
{
	router_index: usize,
	outbound: &'a DirectionMap,
	environment: &'a dyn RouterEnvironment,
}

impl<'a> CreditOutlook<'a>
{
	pub fn new(router_index:usize, outbound:&'a DirectionMap, environment:&'a dyn RouterEnvironment) -> CreditOutlook<'a>
	{
		CreditOutlook{
			router_index,
			outbound,
			environment,
		}
	}
	/// Sum the available credits over the virtual channels of the port bound to `direction`.
	pub fn sum_towards(&self, direction:PortDirection) -> Result<usize,Error>
	{
		let port = self.outbound.port(direction).ok_or_else(||error!(unmapped_direction,self.router_index,direction))?;
		Ok( (0..self.environment.virtual_channels_per_network()).map(|virtual_channel|self.environment.credit_count(port,virtual_channel)).sum() )
	}
}

/// The output-port selection engine of one router.
/// Its route table and direction maps are populated during topology construction and are immutable afterwards; every later call is a pure function of its arguments, the external read-only state, and the injected random source.
#[derive(Quantifiable)]
#[derive(Debug)]
pub struct RoutingUnit
{
	router_index: usize,
	table: WeightedRouteTable,
	inbound_directions: DirectionMap,
	outbound_directions: DirectionMap,
}

impl RoutingUnit
{
	pub fn new(router_index:usize) -> RoutingUnit
	{
		RoutingUnit{
			router_index,
			table: WeightedRouteTable::new(router_index),
			inbound_directions: DirectionMap::new(),
			outbound_directions: DirectionMap::new(),
		}
	}
	pub fn router_index(&self) -> usize
	{
		self.router_index
	}
	/// Append the destination set of the next output link to the route table.
	pub fn add_route(&mut self, destination:NetworkDestination)
	{
		self.table.add_route(destination);
	}
	/// Append the weight of the next output link. Once per `add_route`, same order.
	pub fn add_weight(&mut self, weight:i32)
	{
		self.table.add_weight(weight);
	}
	pub fn register_inbound(&mut self, direction:PortDirection, port:usize)
	{
		self.inbound_directions.register(direction,port);
	}
	pub fn register_outbound(&mut self, direction:PortDirection, port:usize)
	{
		self.outbound_directions.register(direction,port);
	}
	/// The direction of an input port, as registered during the topology build.
	pub fn inbound_direction(&self, port:usize) -> Option<PortDirection>
	{
		self.inbound_directions.direction(port)
	}
	/// Select the output port for a packet. The sole steady-state entry point.
	/// Every success is a valid port index; every failure is non-recoverable at this layer and the caller should halt or report fatally rather than substitute a default route.
	pub fn compute_output_port(&self, environment:&dyn RouterEnvironment, route:&RouteRequest, virtual_channel:usize, _inbound_port:usize, inbound_direction:PortDirection, rng:&mut StdRng) -> Result<usize,Error>
	{
		if route.destination_router == self.router_index
		{
			//The packet has arrived. Several network interfaces may hang from this router, all through Local ports; only the table tells them apart.
			return self.resolve_by_table(environment,route,rng);
		}
		let context = VirtualChannelContext{
			virtual_network: route.virtual_network,
			virtual_channel,
			channels_per_network: environment.virtual_channels_per_network(),
		};
		let algorithm = environment.routing_algorithm().with_escape_override(&context);
		match algorithm
		{
			RoutingAlgorithm::Table => self.resolve_by_table(environment,route,rng),
			RoutingAlgorithm::XY => self.route_mesh(&mesh::DimensionOrder,environment,route,inbound_direction,rng),
			RoutingAlgorithm::TurnModel => self.route_mesh(&mesh::WestFirst,environment,route,inbound_direction,rng),
			RoutingAlgorithm::Random => self.route_mesh(&mesh::QuadrantRandom,environment,route,inbound_direction,rng),
			RoutingAlgorithm::AdaptiveWestFirst => self.route_mesh(&mesh::WestFirstAdaptive,environment,route,inbound_direction,rng),
			RoutingAlgorithm::AdaptiveRandom => self.route_mesh(&mesh::QuadrantAdaptive,environment,route,inbound_direction,rng),
			RoutingAlgorithm::Custom => self.route_mesh(&mesh::Custom,environment,route,inbound_direction,rng),
			//with_escape_override never leaves an EscapeVc tag in place.
			RoutingAlgorithm::EscapeVcRandom | RoutingAlgorithm::EscapeVcAdaptiveRandom => unreachable!(),
		}
	}
	fn resolve_by_table(&self, environment:&dyn RouterEnvironment, route:&RouteRequest, rng:&mut StdRng) -> Result<usize,Error>
	{
		let ordered = environment.is_virtual_network_ordered(route.virtual_network);
		self.table.resolve(route.virtual_network,ordered,&route.destination_set,rng)
	}
	/// Run a mesh strategy and map its direction to an output port.
	fn route_mesh(&self, strategy:&dyn MeshRouting, environment:&dyn RouterEnvironment, route:&RouteRequest, inbound_direction:PortDirection, rng:&mut StdRng) -> Result<usize,Error>
	{
		let columns = environment.mesh_columns();
		let rows = environment.mesh_rows();
		assert!( columns>0 && rows>0 , "mesh strategies require a mesh with positive dimensions" );
		let record = MeshRoutingRecord::new(self.router_index,route.destination_router,columns,inbound_direction)?;
		let credits = CreditOutlook::new(self.router_index,&self.outbound_directions,environment);
		let direction = strategy.next_direction(&record,&credits,rng)?;
		self.outbound_directions.port(direction).ok_or_else(||error!(unmapped_direction,self.router_index,direction))
	}
}
