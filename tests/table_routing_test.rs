mod common;
use rumbo_lib::*;
use ::rand::rngs::StdRng;
use rand::SeedableRng;
use common::*;

fn table_unit(router_index:usize) -> RoutingUnit
{
    //Three output links: link 0 reaches interfaces {0,1}, link 1 reaches {2}, link 2 reaches {1,3} at higher cost.
    let mut unit = mesh_unit(router_index);
    unit.add_route(destination_of(&[0,1]));
    unit.add_weight(1);
    unit.add_route(destination_of(&[2]));
    unit.add_weight(1);
    unit.add_route(destination_of(&[1,3]));
    unit.add_weight(4);
    unit
}

#[test]
fn resolved_link_intersects_and_is_minimum()
{
    let mut rng = StdRng::seed_from_u64(10u64);
    let environment = GridEnvironment::new(4,4,RoutingAlgorithm::Table);
    let unit = table_unit(5);
    let mut route = request_to_router(9);
    route.destination_set = destination_of(&[2]);
    let port = unit.compute_output_port(&environment,&route,0,LOCAL_PORT,PortDirection::Local,&mut rng).unwrap();
    assert_eq!( port , 1 );
    //Interface 1 is reachable through links 0 (weight 1) and 2 (weight 4); only the lighter link qualifies.
    route.destination_set = destination_of(&[1]);
    for _ in 0..50
    {
        let port = unit.compute_output_port(&environment,&route,0,LOCAL_PORT,PortDirection::Local,&mut rng).unwrap();
        assert_eq!( port , 0 );
    }
}

#[test]
fn ordered_network_is_deterministic()
{
    let mut rng = StdRng::seed_from_u64(10u64);
    let mut environment = GridEnvironment::new(4,4,RoutingAlgorithm::Table);
    environment.ordered = vec![true];
    let mut unit = mesh_unit(5);
    //Two equal-weight links both reaching interface 7.
    unit.add_route(destination_of(&[7]));
    unit.add_weight(2);
    unit.add_route(destination_of(&[7,8]));
    unit.add_weight(2);
    let mut route = request_to_router(9);
    route.destination_set = destination_of(&[7]);
    for _ in 0..100
    {
        let port = unit.compute_output_port(&environment,&route,0,LOCAL_PORT,PortDirection::Local,&mut rng).unwrap();
        assert_eq!( port , 0 );
    }
}

#[test]
fn unordered_network_visits_every_candidate()
{
    let mut rng = StdRng::seed_from_u64(10u64);
    let environment = GridEnvironment::new(4,4,RoutingAlgorithm::Table);
    let mut unit = mesh_unit(5);
    unit.add_route(destination_of(&[7]));
    unit.add_weight(2);
    unit.add_route(destination_of(&[7,8]));
    unit.add_weight(2);
    let mut route = request_to_router(9);
    route.destination_set = destination_of(&[7]);
    let mut visits = [0;2];
    for _ in 0..300
    {
        let port = unit.compute_output_port(&environment,&route,0,LOCAL_PORT,PortDirection::Local,&mut rng).unwrap();
        visits[port] += 1;
    }
    assert!( visits[0] > 0 );
    assert!( visits[1] > 0 );
}

#[test]
fn disjoint_destination_fails()
{
    let mut rng = StdRng::seed_from_u64(10u64);
    let environment = GridEnvironment::new(4,4,RoutingAlgorithm::Table);
    let unit = table_unit(5);
    let mut route = request_to_router(9);
    route.virtual_network = 1;
    route.destination_set = destination_of(&[40]);
    let outcome = unit.compute_output_port(&environment,&route,0,LOCAL_PORT,PortDirection::Local,&mut rng);
    match outcome
    {
        Err(error) => match error.kind
        {
            rumbo_lib::error::ErrorKind::NoRouteExists{router_index,virtual_network} =>
            {
                assert_eq!( router_index , 5 );
                assert_eq!( virtual_network , 1 );
            },
            other => panic!("expected NoRouteExists, got {:?}",other),
        },
        Ok(port) => panic!("expected failure, got port {}",port),
    }
}

#[test]
fn local_delivery_always_uses_the_table()
{
    //Even under a mesh algorithm, a packet for this very router is resolved by table to pick the right interface.
    let mut rng = StdRng::seed_from_u64(10u64);
    let environment = GridEnvironment::new(4,4,RoutingAlgorithm::XY);
    let unit = table_unit(5);
    let mut route = request_to_router(5);
    route.destination_set = destination_of(&[2]);
    let port = unit.compute_output_port(&environment,&route,0,WEST_PORT,PortDirection::West,&mut rng).unwrap();
    assert_eq!( port , 1 );
}
