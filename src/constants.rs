/// The Boltzmann constant in kiloJoule per mole kelvin
// TODO: this is the molar gas constant; rename once the unit system is made explicit
pub const KB_KJPERMOLEKELVIN: f64 = 0.0083144621;
