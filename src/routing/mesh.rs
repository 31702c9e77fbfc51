/*!

The family of routing strategies for 2D meshes.

All of them share a preamble deriving the coordinates of the current and destination routers from their indices and the column count of the mesh, and all of them return a symbolic [PortDirection] that the dispatcher maps to an output port. They differ in how they choose among the admissible directions:

* [DimensionOrder] resolves the whole X offset before any Y hop. Deterministic and deadlock-free by construction.
* [WestFirst] applies the west-first turn model: any westward component is resolved first, eastbound quadrants pick randomly between their two admissible directions.
* [QuadrantRandom] picks randomly between the two admissible directions in every quadrant. No deadlock-avoidance guarantee on its own; to be used on channels protected by an escape channel.
* [WestFirstAdaptive] is the west-first model with the random choices replaced by comparing downstream credits. Deadlock-free, employed on the escape channel.
* [QuadrantAdaptive] compares downstream credits in every quadrant. The highest-throughput variant, only for channels protected by an escape channel.
* [Custom] is the extension point for topology-specific policies and has no implementation here.

*/

use std::fmt::Debug;

use ::rand::{rngs::StdRng,Rng};

use crate::direction::PortDirection;
use crate::error::Error;
use crate::error;
use crate::routing::{CreditOutlook,RoutingAlgorithm};

/// The geometric data every mesh strategy works from, computed per routing decision.
/// Building one for a packet already at its destination router is a dispatch defect and fails.
#[derive(Debug)]
pub struct MeshRoutingRecord
{
	pub x_hops: usize,
	pub y_hops: usize,
	///Whether the destination is at the East (or the same column).
	pub x_positive: bool,
	///Whether the destination is at the North (or the same row).
	pub y_positive: bool,
	///Direction of the port the packet came in through.
	pub inbound: PortDirection,
}

impl MeshRoutingRecord
{
	pub fn new(router_index:usize, destination_router:usize, columns:usize, inbound:PortDirection) -> Result<MeshRoutingRecord,Error>
	{
		let my_x = router_index % columns;
		let my_y = router_index / columns;
		let dest_x = destination_router % columns;
		let dest_y = destination_router / columns;
		let record = MeshRoutingRecord{
			x_hops: if dest_x>=my_x { dest_x-my_x } else { my_x-dest_x },
			y_hops: if dest_y>=my_y { dest_y-my_y } else { my_y-dest_y },
			x_positive: dest_x>=my_x,
			y_positive: dest_y>=my_y,
			inbound,
		};
		if record.x_hops==0 && record.y_hops==0
		{
			//The dispatcher resolves arrived packets by table; they must never reach a mesh strategy.
			return Err(error!(invariant_violation,router_index,destination_router));
		}
		Ok(record)
	}
	/// The single admissible direction when only one axis has pending hops, if so.
	pub fn single_axis(&self) -> Option<PortDirection>
	{
		if self.x_hops==0
		{
			Some(if self.y_positive { PortDirection::North } else { PortDirection::South })
		}
		else if self.y_hops==0
		{
			Some(if self.x_positive { PortDirection::East } else { PortDirection::West })
		}
		else
		{
			None
		}
	}
}

/// A strategy computing the outbound direction of a packet on a 2D mesh.
/// `credits` gives read-only access to the credits of the candidate output ports; only the adaptive strategies consult it.
pub trait MeshRouting : Debug
{
	fn next_direction(&self, record:&MeshRoutingRecord, credits:&CreditOutlook, rng:&mut StdRng) -> Result<PortDirection,Error>;
}

fn either(first:PortDirection, second:PortDirection, rng:&mut StdRng) -> PortDirection
{
	if rng.gen_range(0..2)==0 { first } else { second }
}

///Compare the credit sums of two admissible directions, preferring the one with strictly more credits.
///Exact ties fall back to a uniform random choice.
fn prefer_by_credit(credits:&CreditOutlook, first:PortDirection, second:PortDirection, rng:&mut StdRng) -> Result<PortDirection,Error>
{
	let credits_first = credits.sum_towards(first)?;
	let credits_second = credits.sum_towards(second)?;
	if credits_first > credits_second
	{
		Ok(first)
	}
	else if credits_second > credits_first
	{
		Ok(second)
	}
	else
	{
		Ok(either(first,second,rng))
	}
}

///Dimension-order (XY) routing: all X hops strictly before any Y hop.
#[derive(Debug)]
pub struct DimensionOrder;

impl MeshRouting for DimensionOrder
{
	fn next_direction(&self, record:&MeshRoutingRecord, _credits:&CreditOutlook, _rng:&mut StdRng) -> Result<PortDirection,Error>
	{
		if record.x_hops>0
		{
			if record.x_positive
			{
				assert!( record.inbound==PortDirection::Local || record.inbound==PortDirection::West , "an eastbound packet cannot come from {}",record.inbound );
				Ok(PortDirection::East)
			}
			else
			{
				assert!( record.inbound==PortDirection::Local || record.inbound==PortDirection::East , "a westbound packet cannot come from {}",record.inbound );
				Ok(PortDirection::West)
			}
		}
		else if record.y_positive
		{
			assert!( record.inbound!=PortDirection::North , "a northbound packet cannot come from North" );
			Ok(PortDirection::North)
		}
		else
		{
			assert!( record.inbound!=PortDirection::South , "a southbound packet cannot come from South" );
			Ok(PortDirection::South)
		}
	}
}

///The west-first turn model: any westward motion completes before turning, which eliminates the turns closing a dependency cycle.
///Eastbound quadrants choose uniformly at random between their two admissible directions.
#[derive(Debug)]
pub struct WestFirst;

impl MeshRouting for WestFirst
{
	fn next_direction(&self, record:&MeshRoutingRecord, _credits:&CreditOutlook, rng:&mut StdRng) -> Result<PortDirection,Error>
	{
		if let Some(direction) = record.single_axis()
		{
			return Ok(direction);
		}
		Ok(match (record.x_positive,record.y_positive)
		{
			(true,true) => either(PortDirection::East,PortDirection::North,rng),//Quadrant I
			(false,true) => PortDirection::West,//Quadrant II
			(false,false) => PortDirection::West,//Quadrant III
			(true,false) => either(PortDirection::East,PortDirection::South,rng),//Quadrant IV
		})
	}
}

///Choose uniformly at random between the two admissible directions of the quadrant, westbound ones included.
#[derive(Debug)]
pub struct QuadrantRandom;

impl MeshRouting for QuadrantRandom
{
	fn next_direction(&self, record:&MeshRoutingRecord, _credits:&CreditOutlook, rng:&mut StdRng) -> Result<PortDirection,Error>
	{
		if let Some(direction) = record.single_axis()
		{
			return Ok(direction);
		}
		Ok(match (record.x_positive,record.y_positive)
		{
			(true,true) => either(PortDirection::East,PortDirection::North,rng),//Quadrant I
			(false,true) => either(PortDirection::West,PortDirection::North,rng),//Quadrant II
			(false,false) => either(PortDirection::West,PortDirection::South,rng),//Quadrant III
			(true,false) => either(PortDirection::East,PortDirection::South,rng),//Quadrant IV
		})
	}
}

///The west-first turn model made adaptive: the eastbound quadrants compare the credit sums of their two admissible ports instead of drawing at random.
///The westbound quadrants keep the forced West hop, so the strategy stays deadlock-free and can serve as escape.
#[derive(Debug)]
pub struct WestFirstAdaptive;

impl MeshRouting for WestFirstAdaptive
{
	fn next_direction(&self, record:&MeshRoutingRecord, credits:&CreditOutlook, rng:&mut StdRng) -> Result<PortDirection,Error>
	{
		if let Some(direction) = record.single_axis()
		{
			return Ok(direction);
		}
		match (record.x_positive,record.y_positive)
		{
			(true,true) => prefer_by_credit(credits,PortDirection::East,PortDirection::North,rng),//Quadrant I
			(false,true) => Ok(PortDirection::West),//Quadrant II
			(false,false) => Ok(PortDirection::West),//Quadrant III
			(true,false) => prefer_by_credit(credits,PortDirection::East,PortDirection::South,rng),//Quadrant IV
		}
	}
}

///Credit comparison between the two admissible directions of every quadrant.
#[derive(Debug)]
pub struct QuadrantAdaptive;

impl MeshRouting for QuadrantAdaptive
{
	fn next_direction(&self, record:&MeshRoutingRecord, credits:&CreditOutlook, rng:&mut StdRng) -> Result<PortDirection,Error>
	{
		if let Some(direction) = record.single_axis()
		{
			return Ok(direction);
		}
		match (record.x_positive,record.y_positive)
		{
			(true,true) => prefer_by_credit(credits,PortDirection::East,PortDirection::North,rng),//Quadrant I
			(false,true) => prefer_by_credit(credits,PortDirection::West,PortDirection::North,rng),//Quadrant II
			(false,false) => prefer_by_credit(credits,PortDirection::West,PortDirection::South,rng),//Quadrant III
			(true,false) => prefer_by_credit(credits,PortDirection::East,PortDirection::South,rng),//Quadrant IV
		}
	}
}

///Extension point for topology-specific policies. Selecting it without an implementation is a programming error.
#[derive(Debug)]
pub struct Custom;

impl MeshRouting for Custom
{
	fn next_direction(&self, _record:&MeshRoutingRecord, _credits:&CreditOutlook, _rng:&mut StdRng) -> Result<PortDirection,Error>
	{
		Err(error!(unimplemented_algorithm,RoutingAlgorithm::Custom))
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn coordinates_from_indices()
	{
		//Router 5 of a 4-column mesh sits at (1,1); router 14 at (2,3).
		let record = MeshRoutingRecord::new(5,14,4,PortDirection::Local).unwrap();
		assert_eq!( record.x_hops , 1 );
		assert_eq!( record.y_hops , 2 );
		assert!( record.x_positive );
		assert!( record.y_positive );
		assert!( record.single_axis().is_none() );
	}

	#[test]
	fn arrived_packet_is_a_defect()
	{
		let outcome = MeshRoutingRecord::new(6,6,4,PortDirection::Local);
		match outcome
		{
			Err(error) => match error.kind
			{
				crate::error::ErrorKind::InvariantViolation{router_index,destination_router} =>
				{
					assert_eq!( router_index , 6 );
					assert_eq!( destination_router , 6 );
				},
				other => panic!("expected InvariantViolation, got {:?}",other),
			},
			Ok(record) => panic!("expected failure, got record {:?}",record),
		}
	}

	#[test]
	fn single_axis_directions()
	{
		let record = MeshRoutingRecord::new(5,7,4,PortDirection::Local).unwrap();
		assert_eq!( record.single_axis() , Some(PortDirection::East) );
		let record = MeshRoutingRecord::new(5,4,4,PortDirection::Local).unwrap();
		assert_eq!( record.single_axis() , Some(PortDirection::West) );
		let record = MeshRoutingRecord::new(5,13,4,PortDirection::Local).unwrap();
		assert_eq!( record.single_axis() , Some(PortDirection::North) );
		let record = MeshRoutingRecord::new(5,1,4,PortDirection::Local).unwrap();
		assert_eq!( record.single_axis() , Some(PortDirection::South) );
	}
}
