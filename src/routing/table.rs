/*!

The weighted route table and its resolution rule.

The topology build populates one table per router with an entry per output link: the set of network interfaces reachable through that link plus a weight biasing the selection. Routes can be biased via weight assignments in the topology description. Correct weight assignments are critical to provide deadlock avoidance; the table only consumes them.

*/

use ::rand::{rngs::StdRng,Rng};
use itertools::izip;

use quantifiable_derive::Quantifiable;//the derive macro
use crate::quantify::Quantifiable;
use crate::error::Error;
use crate::error;

/// A set of network-interface indices, used both as table entry and as per-packet destination.
/// Only membership and intersection are required by the routing core; any richer set algebra belongs to the embedding simulator.
#[derive(Quantifiable)]
#[derive(Clone,Debug,Default)]
pub struct NetworkDestination
{
	///Sorted, without duplicates.
	interfaces: Vec<usize>,
}

impl NetworkDestination
{
	pub fn new() -> NetworkDestination
	{
		NetworkDestination{
			interfaces: vec![],
		}
	}
	pub fn add(&mut self, interface:usize)
	{
		if let Err(position) = self.interfaces.binary_search(&interface)
		{
			self.interfaces.insert(position,interface);
		}
	}
	pub fn contains(&self, interface:usize) -> bool
	{
		self.interfaces.binary_search(&interface).is_ok()
	}
	/// Whether both sets share some network interface.
	pub fn intersects(&self, other:&NetworkDestination) -> bool
	{
		//Both lists are sorted, walk them in parallel.
		let mut mine = self.interfaces.iter().peekable();
		let mut theirs = other.interfaces.iter().peekable();
		while let (Some(&&a),Some(&&b)) = (mine.peek(),theirs.peek())
		{
			if a==b
			{
				return true;
			}
			if a<b { mine.next(); } else { theirs.next(); }
		}
		false
	}
}

impl std::iter::FromIterator<usize> for NetworkDestination
{
	fn from_iter<I:IntoIterator<Item=usize>>(iterator:I) -> NetworkDestination
	{
		let mut destination = NetworkDestination::new();
		for interface in iterator
		{
			destination.add(interface);
		}
		destination
	}
}

/// The per-router route table: an ordered list of (destination set, weight) pairs, one per output link.
/// Both lists are appended in step during the topology build, with entry `i` of each referring to the same link.
#[derive(Quantifiable)]
#[derive(Debug)]
pub struct WeightedRouteTable
{
	router_index: usize,
	destinations: Vec<NetworkDestination>,
	weights: Vec<i32>,
}

impl WeightedRouteTable
{
	pub fn new(router_index:usize) -> WeightedRouteTable
	{
		WeightedRouteTable{
			router_index,
			destinations: vec![],
			weights: vec![],
		}
	}
	/// Append the destination set of the next output link. The link index is implicit, following the enumeration order of the output ports.
	pub fn add_route(&mut self, destination:NetworkDestination)
	{
		self.destinations.push(destination);
	}
	/// Append the weight of the next output link. To be called once per `add_route`, in the same order.
	pub fn add_weight(&mut self, weight:i32)
	{
		self.weights.push(weight);
	}
	pub fn len(&self) -> usize
	{
		self.destinations.len()
	}
	/// Resolve a destination set into the index of an output link.
	/// Among the entries intersecting `destination` only those of minimum weight are candidates.
	/// An ordered virtual network always takes the first candidate, so all packets of a flow follow the same link.
	/// Otherwise the candidate is chosen uniformly at random, spreading load over equal-cost links.
	pub fn resolve(&self, virtual_network:usize, ordered:bool, destination:&NetworkDestination, rng:&mut StdRng) -> Result<usize,Error>
	{
		assert_eq!(self.destinations.len(),self.weights.len(),"the route table of router {} has {} destination sets but {} weights",self.router_index,self.destinations.len(),self.weights.len());
		let minimum_weight = izip!(&self.destinations,&self.weights)
			.filter(|(entry,_weight)|entry.intersects(destination))
			.map(|(_entry,&weight)|weight)
			.min();
		let minimum_weight = match minimum_weight
		{
			Some(weight) => weight,
			None => return Err(error!(no_route_exists,self.router_index,virtual_network)),
		};
		//Collect every minimum-weight candidate preserving table order.
		let candidates : Vec<usize> = izip!(&self.destinations,&self.weights).enumerate()
			.filter(|(_link,(entry,weight))| **weight==minimum_weight && entry.intersects(destination))
			.map(|(link,_)|link)
			.collect();
		let selected = if ordered
		{
			0
		}
		else
		{
			rng.gen_range(0..candidates.len())
		};
		Ok(candidates[selected])
	}
}
