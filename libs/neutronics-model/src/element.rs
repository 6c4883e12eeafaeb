//! # Elements
//!
//! Natural elements H through U with standard atomic weights (g/mol),
//! looked up by symbol or name.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub z: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_weight: f64,
}

macro_rules! elements {
    ($(($z:literal, $symbol:literal, $name:literal, $weight:literal)),* $(,)?) => {
        const ELEMENTS: &[Element] = &[
            $(Element { z: $z, symbol: $symbol, name: $name, atomic_weight: $weight }),*
        ];
    };
}

elements![
    (1, "H", "hydrogen", 1.008),
    (2, "He", "helium", 4.002_602),
    (3, "Li", "lithium", 6.94),
    (4, "Be", "beryllium", 9.012_183),
    (5, "B", "boron", 10.81),
    (6, "C", "carbon", 12.011),
    (7, "N", "nitrogen", 14.007),
    (8, "O", "oxygen", 15.999),
    (9, "F", "fluorine", 18.998_403),
    (10, "Ne", "neon", 20.1797),
    (11, "Na", "sodium", 22.989_769),
    (12, "Mg", "magnesium", 24.305),
    (13, "Al", "aluminum", 26.981_538),
    (14, "Si", "silicon", 28.085),
    (15, "P", "phosphorus", 30.973_762),
    (16, "S", "sulfur", 32.06),
    (17, "Cl", "chlorine", 35.45),
    (18, "Ar", "argon", 39.948),
    (19, "K", "potassium", 39.0983),
    (20, "Ca", "calcium", 40.078),
    (21, "Sc", "scandium", 44.955_908),
    (22, "Ti", "titanium", 47.867),
    (23, "V", "vanadium", 50.9415),
    (24, "Cr", "chromium", 51.9961),
    (25, "Mn", "manganese", 54.938_044),
    (26, "Fe", "iron", 55.845),
    (27, "Co", "cobalt", 58.933_194),
    (28, "Ni", "nickel", 58.6934),
    (29, "Cu", "copper", 63.546),
    (30, "Zn", "zinc", 65.38),
    (31, "Ga", "gallium", 69.723),
    (32, "Ge", "germanium", 72.630),
    (33, "As", "arsenic", 74.921_595),
    (34, "Se", "selenium", 78.971),
    (35, "Br", "bromine", 79.904),
    (36, "Kr", "krypton", 83.798),
    (37, "Rb", "rubidium", 85.4678),
    (38, "Sr", "strontium", 87.62),
    (39, "Y", "yttrium", 88.905_84),
    (40, "Zr", "zirconium", 91.224),
    (41, "Nb", "niobium", 92.906_37),
    (42, "Mo", "molybdenum", 95.95),
    (43, "Tc", "technetium", 97.907),
    (44, "Ru", "ruthenium", 101.07),
    (45, "Rh", "rhodium", 102.905_50),
    (46, "Pd", "palladium", 106.42),
    (47, "Ag", "silver", 107.8682),
    (48, "Cd", "cadmium", 112.414),
    (49, "In", "indium", 114.818),
    (50, "Sn", "tin", 118.710),
    (51, "Sb", "antimony", 121.760),
    (52, "Te", "tellurium", 127.60),
    (53, "I", "iodine", 126.904_47),
    (54, "Xe", "xenon", 131.293),
    (55, "Cs", "cesium", 132.905_45),
    (56, "Ba", "barium", 137.327),
    (57, "La", "lanthanum", 138.905_47),
    (58, "Ce", "cerium", 140.116),
    (59, "Pr", "praseodymium", 140.907_66),
    (60, "Nd", "neodymium", 144.242),
    (61, "Pm", "promethium", 144.913),
    (62, "Sm", "samarium", 150.36),
    (63, "Eu", "europium", 151.964),
    (64, "Gd", "gadolinium", 157.25),
    (65, "Tb", "terbium", 158.925_35),
    (66, "Dy", "dysprosium", 162.500),
    (67, "Ho", "holmium", 164.930_33),
    (68, "Er", "erbium", 167.259),
    (69, "Tm", "thulium", 168.934_22),
    (70, "Yb", "ytterbium", 173.045),
    (71, "Lu", "lutetium", 174.9668),
    (72, "Hf", "hafnium", 178.49),
    (73, "Ta", "tantalum", 180.947_88),
    (74, "W", "tungsten", 183.84),
    (75, "Re", "rhenium", 186.207),
    (76, "Os", "osmium", 190.23),
    (77, "Ir", "iridium", 192.217),
    (78, "Pt", "platinum", 195.084),
    (79, "Au", "gold", 196.966_57),
    (80, "Hg", "mercury", 200.592),
    (81, "Tl", "thallium", 204.38),
    (82, "Pb", "lead", 207.2),
    (83, "Bi", "bismuth", 208.980_40),
    (84, "Po", "polonium", 208.982),
    (85, "At", "astatine", 209.987),
    (86, "Rn", "radon", 222.018),
    (87, "Fr", "francium", 223.020),
    (88, "Ra", "radium", 226.025),
    (89, "Ac", "actinium", 227.028),
    (90, "Th", "thorium", 232.0377),
    (91, "Pa", "protactinium", 231.035_88),
    (92, "U", "uranium", 238.028_91),
];

/// British spellings accepted as names.
const ALIASES: &[(&str, &str)] = &[("aluminium", "Al"), ("caesium", "Cs"), ("sulphur", "S")];

/// Finds an element by symbol (`"Cr"`) or name (`"zirconium"`), ignoring case.
///
/// ```rust
/// use neutronics_model::element::lookup;
///
/// assert_eq!(lookup("cr").unwrap().name, "chromium");
/// assert_eq!(lookup("Zirconium").unwrap().symbol, "Zr");
/// assert!(lookup("unobtainium").is_none());
/// ```
pub fn lookup(key: &str) -> Option<&'static Element> {
    let key = key.trim();
    let symbol = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(key))
        .map_or(key, |&(_, symbol)| symbol);
    ELEMENTS
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(symbol) || e.name.eq_ignore_ascii_case(symbol))
}

pub fn all() -> &'static [Element] {
    ELEMENTS
}
