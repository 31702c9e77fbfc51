/*!

This module is for managing errors in the code of rumbo-lib. To avoid invoking `panic!` in favor of a more graceful exit. Cases that should never happen can be kept as `panic!`.

All the error kinds of the routing core are non-recoverable: the caller is expected to halt or report fatally. They are nevertheless returned as values instead of aborting, so that the embedding simulator decides whether to halt, log, or panic.

Instead of `expect` or `unwrap_or_else` try
* `map_err` like in `.map_err(|e|error!(undetermined).with_message(format!("{e}")))?;`
* `ok_or_else` like in `.ok_or_else( ||error!(unmapped_direction,router,direction) )?;`

*/

use std::fmt::{Display,Formatter};

use crate::direction::PortDirection;
use crate::routing::RoutingAlgorithm;

/// The main Error class to be used in each `Result(Whatever,Error)`.
/// It contains the code source of the error and its kind.
/// An arbitrary `String` message can be optionally attached.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

/// A source code location where an error occurred.
/// Contains the values of the macros `std::{file,line,column}`.
#[derive(Debug)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

#[derive(Debug)]
pub enum ErrorKind
{
	/// No entry of the route table intersects the requested destination set.
	/// The topology populating the table is malformed.
	NoRouteExists{
		router_index: usize,
		virtual_network: usize,
	},
	/// A routing strategy computed a direction for which no output port has been registered.
	/// The port wiring of the topology is incomplete.
	UnmappedDirection{
		router_index: usize,
		direction: PortDirection,
	},
	/// The custom algorithm extension point was selected without providing an implementation.
	UnimplementedAlgorithm{
		algorithm: RoutingAlgorithm,
	},
	/// A geometric strategy received a packet already at its destination router.
	/// The dispatcher must resolve those by table, so reaching a strategy is a defect in the caller.
	InvariantViolation{
		router_index: usize,
		destination_router: usize,
	},
	/// Any other error. Better to add new types than to use this thing.
	Undetermined,
}

// source_location!()
#[macro_export]
macro_rules! source_location{
	() => {
		$crate::error::SourceLocation{
			file: file!(),
			line: line!(),
			column: column!(),
		}
	}
}

// error!(no_route_exists,router_index,virtual_network)
#[macro_export]
macro_rules! error{
	($kind:ident $(,$args:expr)*) => {
		$crate::error::Error::$kind( $crate::source_location!() $(,$args)* )
	}
}

use ErrorKind::*;

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message:None,
		}
	}
	pub fn with_message(mut self,message:String) -> Error
	{
		self.message=Some(message);
		self
	}
	/// example call: error!(no_route_exists,router_index,virtual_network).
	pub fn no_route_exists(source_location:SourceLocation,router_index:usize,virtual_network:usize) -> Error
	{
		Error{
			source_location,
			kind: NoRouteExists{
				router_index,
				virtual_network,
			},
			message:None,
		}
	}
	pub fn unmapped_direction(source_location:SourceLocation,router_index:usize,direction:PortDirection) -> Error
	{
		Error{
			source_location,
			kind: UnmappedDirection{
				router_index,
				direction,
			},
			message:None,
		}
	}
	pub fn unimplemented_algorithm(source_location:SourceLocation,algorithm:RoutingAlgorithm) -> Error
	{
		Error{
			source_location,
			kind: UnimplementedAlgorithm{
				algorithm,
			},
			message:None,
		}
	}
	pub fn invariant_violation(source_location:SourceLocation,router_index:usize,destination_router:usize) -> Error
	{
		Error{
			source_location,
			kind: InvariantViolation{
				router_index,
				destination_router,
			},
			message:None,
		}
	}
	pub fn undetermined(source_location:SourceLocation) -> Error
	{
		Error{
			source_location,
			kind: Undetermined,
			message:None,
		}
	}
}

impl Display for SourceLocation
{
	fn fmt(&self, formatter:&mut Formatter) -> Result<(),std::fmt::Error>
	{
		write!(formatter,"{}:{}:{}",self.file,self.line,self.column)
	}
}

impl Display for ErrorKind
{
	fn fmt(&self, formatter:&mut Formatter) -> Result<(),std::fmt::Error>
	{
		match self
		{
			NoRouteExists{router_index,virtual_network} => write!(formatter,"no route exists from router {} for virtual network {}",router_index,virtual_network),
			UnmappedDirection{router_index,direction} => write!(formatter,"router {} has no output port registered for direction {}",router_index,direction),
			UnimplementedAlgorithm{algorithm} => write!(formatter,"the routing algorithm {:?} has no implementation",algorithm),
			InvariantViolation{router_index,destination_router} => write!(formatter,"a geometric strategy of router {} received a packet for router {}, already at destination",router_index,destination_router),
			Undetermined => write!(formatter,"undetermined error"),
		}
	}
}

impl Display for Error
{
	fn fmt(&self, formatter:&mut Formatter) -> Result<(),std::fmt::Error>
	{
		write!(formatter,"Error at {}: {}",self.source_location,self.kind)?;
		if let Some(ref message) = self.message
		{
			write!(formatter," ({})",message)?;
		}
		Ok(())
	}
}
