//! tn-check: feasibility of an edited solution.
//!
//! [`check_solution`] runs the rules below in order over the whole instance and
//! stops at the first one that fails:
//!
//! 1. a city never receives two tubes of the same sample type
//! 2. no arc leaves and enters the same city
//! 3. no arc delivers back to its tube's cohort city
//! 4. every tube holds what its delivery tree requires
//! 5. the cohort draws from the allowed number of tubes of each type ([`DrawPolicy`])
//! 6. no city is more than `max_freezes` hops from its cohort along a tube
//! 7. every city with a demand is reached by some tube of that type

pub mod policy;
pub mod rules;
pub mod violation;

pub use policy::DrawPolicy;
pub use rules::check_solution;
pub use violation::{CheckResult, Violation};
