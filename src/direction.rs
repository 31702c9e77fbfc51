/*!

Symbolic port directions of a router and their binding to port indices.

A router model enumerates its ports by index; mesh routing strategies reason in terms of compass directions plus the local injection/ejection ports. A [DirectionMap] keeps the correspondence for one side (inbound or outbound) of one router. It is populated while wiring the topology and is read-only afterwards.

*/

use std::fmt::{Display,Formatter};
use std::mem::size_of;

use quantifiable_derive::Quantifiable;//the derive macro
use crate::quantify::Quantifiable;

/// A closed enumeration of the port directions of a mesh router.
/// `Local` stands for any port attached to a network interface instead of another router.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum PortDirection
{
	North,
	South,
	East,
	West,
	Local,
}

impl PortDirection
{
	pub const COUNT: usize = 5;
	/// The position of the direction inside direction-indexed arrays.
	pub fn index(self) -> usize
	{
		match self
		{
			PortDirection::North => 0,
			PortDirection::South => 1,
			PortDirection::East => 2,
			PortDirection::West => 3,
			PortDirection::Local => 4,
		}
	}
}

impl Display for PortDirection
{
	fn fmt(&self, formatter:&mut Formatter) -> Result<(),std::fmt::Error>
	{
		let name = match self
		{
			PortDirection::North => "North",
			PortDirection::South => "South",
			PortDirection::East => "East",
			PortDirection::West => "West",
			PortDirection::Local => "Local",
		};
		write!(formatter,"{}",name)
	}
}

impl Quantifiable for PortDirection
{
	fn total_memory(&self) -> usize
	{
		size_of::<PortDirection>()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		size_of::<PortDirection>()
	}
}

/// A bijection between port directions and port indices for one side of a router.
/// Registered while building the topology, immutable afterwards.
/// Each direction binds to at most one index and vice versa; rebinding is a wiring bug and panics.
#[derive(Quantifiable)]
#[derive(Debug)]
pub struct DirectionMap
{
	direction_to_port: [Option<usize>; PortDirection::COUNT],
	port_to_direction: Vec<Option<PortDirection>>,
}

impl DirectionMap
{
	pub fn new() -> DirectionMap
	{
		DirectionMap{
			direction_to_port: [None; PortDirection::COUNT],
			port_to_direction: vec![],
		}
	}
	/// Bind `direction` to `port`, in both senses.
	pub fn register(&mut self, direction:PortDirection, port:usize)
	{
		let entry = &mut self.direction_to_port[direction.index()];
		if let Some(previous) = *entry
		{
			panic!("direction {} is already bound to port {}",direction,previous);
		}
		*entry = Some(port);
		if self.port_to_direction.len() <= port
		{
			self.port_to_direction.resize(port+1,None);
		}
		if let Some(previous) = self.port_to_direction[port]
		{
			panic!("port {} is already bound to direction {}",port,previous);
		}
		self.port_to_direction[port] = Some(direction);
	}
	/// The port index bound to a direction, if any.
	pub fn port(&self, direction:PortDirection) -> Option<usize>
	{
		self.direction_to_port[direction.index()]
	}
	/// The direction bound to a port index, if any.
	pub fn direction(&self, port:usize) -> Option<PortDirection>
	{
		self.port_to_direction.get(port).copied().flatten()
	}
}

impl Default for DirectionMap
{
	fn default() -> DirectionMap
	{
		DirectionMap::new()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn bijection()
	{
		let mut map = DirectionMap::new();
		map.register(PortDirection::Local,0);
		map.register(PortDirection::East,2);
		map.register(PortDirection::West,1);
		assert_eq!( map.port(PortDirection::East) , Some(2) );
		assert_eq!( map.port(PortDirection::West) , Some(1) );
		assert_eq!( map.port(PortDirection::North) , None );
		assert_eq!( map.direction(0) , Some(PortDirection::Local) );
		assert_eq!( map.direction(2) , Some(PortDirection::East) );
		assert_eq!( map.direction(5) , None );
	}
	#[test]
	#[should_panic]
	fn rebinding_direction()
	{
		let mut map = DirectionMap::new();
		map.register(PortDirection::North,3);
		map.register(PortDirection::North,4);
	}
	#[test]
	#[should_panic]
	fn rebinding_port()
	{
		let mut map = DirectionMap::new();
		map.register(PortDirection::North,3);
		map.register(PortDirection::South,3);
	}
}
