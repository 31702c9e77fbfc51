use rumbo_lib::*;

///Port enumeration shared by every router of the test meshes.
pub const LOCAL_PORT: usize = 0;
pub const NORTH_PORT: usize = 1;
pub const SOUTH_PORT: usize = 2;
pub const EAST_PORT: usize = 3;
pub const WEST_PORT: usize = 4;

///A mock of the router/network state consumed by the routing core.
///Credits are plain fields so each test sets the scenario it needs before calling the unit.
#[derive(Debug)]
pub struct GridEnvironment
{
    pub columns: usize,
    pub rows: usize,
    pub algorithm: RoutingAlgorithm,
    pub channels_per_network: usize,
    ///Index by virtual network; missing entries count as unordered.
    pub ordered: Vec<bool>,
    ///credits[port][virtual_channel]
    pub credits: Vec<Vec<usize>>,
}

impl GridEnvironment
{
    pub fn new(columns:usize, rows:usize, algorithm:RoutingAlgorithm) -> GridEnvironment
    {
        GridEnvironment{
            columns,
            rows,
            algorithm,
            channels_per_network: 1,
            ordered: vec![],
            credits: vec![vec![0;8];5],
        }
    }
    ///Set the same credit count on every virtual channel of a port.
    pub fn set_port_credits(&mut self, port:usize, amount:usize)
    {
        for credit in self.credits[port].iter_mut()
        {
            *credit = amount;
        }
    }
}

impl RouterEnvironment for GridEnvironment
{
    fn mesh_columns(&self) -> usize { self.columns }
    fn mesh_rows(&self) -> usize { self.rows }
    fn routing_algorithm(&self) -> RoutingAlgorithm { self.algorithm }
    fn virtual_channels_per_network(&self) -> usize { self.channels_per_network }
    fn is_virtual_network_ordered(&self, virtual_network:usize) -> bool
    {
        self.ordered.get(virtual_network).copied().unwrap_or(false)
    }
    fn credit_count(&self, port:usize, virtual_channel:usize) -> usize
    {
        self.credits.get(port).and_then(|per_port|per_port.get(virtual_channel)).copied().unwrap_or(0)
    }
}

///A routing unit wired like a full interior mesh router, with all five directions on both sides.
pub fn mesh_unit(router_index:usize) -> RoutingUnit
{
    let mut unit = RoutingUnit::new(router_index);
    unit.register_inbound(PortDirection::Local,LOCAL_PORT);
    unit.register_inbound(PortDirection::North,NORTH_PORT);
    unit.register_inbound(PortDirection::South,SOUTH_PORT);
    unit.register_inbound(PortDirection::East,EAST_PORT);
    unit.register_inbound(PortDirection::West,WEST_PORT);
    unit.register_outbound(PortDirection::Local,LOCAL_PORT);
    unit.register_outbound(PortDirection::North,NORTH_PORT);
    unit.register_outbound(PortDirection::South,SOUTH_PORT);
    unit.register_outbound(PortDirection::East,EAST_PORT);
    unit.register_outbound(PortDirection::West,WEST_PORT);
    unit
}

pub fn direction_of_port(port:usize) -> PortDirection
{
    match port
    {
        LOCAL_PORT => PortDirection::Local,
        NORTH_PORT => PortDirection::North,
        SOUTH_PORT => PortDirection::South,
        EAST_PORT => PortDirection::East,
        WEST_PORT => PortDirection::West,
        _ => panic!("port {} is not wired",port),
    }
}

pub fn destination_of(interfaces:&[usize]) -> NetworkDestination
{
    interfaces.iter().copied().collect()
}

pub fn request_to_router(destination_router:usize) -> RouteRequest
{
    RouteRequest{
        destination_router,
        virtual_network: 0,
        destination_set: NetworkDestination::new(),
    }
}

///Advance one hop: the index of the next router and the inbound direction the packet shows up with there.
pub fn step(router:usize, direction:PortDirection, columns:usize) -> (usize,PortDirection)
{
    match direction
    {
        PortDirection::North => (router+columns,PortDirection::South),
        PortDirection::South => (router-columns,PortDirection::North),
        PortDirection::East => (router+1,PortDirection::West),
        PortDirection::West => (router-1,PortDirection::East),
        PortDirection::Local => panic!("a packet cannot hop through a Local port"),
    }
}
