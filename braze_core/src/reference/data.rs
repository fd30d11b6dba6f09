//! Static guidance rows, transcribed from the MIL-STD-248D and MIL-S-23284A
//! quick-reference material. Column order matches the table headings in
//! [`super::TableId::table`].

pub(super) const BASE_FILLER_MATERIALS: &[&[&str]] = &[
    &["Low-carbon steel sheet", "AWS A5.18 ER70S-6; AWS A5.20 E71T-1", "GMAW, FCAW, GTAW", "MIL-STD-248D"],
    &["Austenitic stainless steel", "AWS A5.9 ER308L/ER309L; AWS A5.22 E308LT", "GTAW, GMAW-P, SMAW", "MIL-STD-248D"],
    &["Aluminum alloys (5xxx/6xxx)", "AWS A5.10 ER4043; AWS A5.10 ER5356", "GMAW, GTAW", "MIL-S-23284A"],
    &["Nickel-base alloys", "AWS A5.14 ERNiCr-3; BNi-2 brazing alloy", "GTAW, brazing", "MIL-S-23284A"],
];

pub(super) const INSPECTION_CHECKLIST: &[&[&str]] = &[
    &[
        "Joint preparation",
        "Edges deburred, fit-up within specified root opening, backing/consumable inserts per WPS",
        "Controls penetration and prevents inclusions or lack of fusion",
    ],
    &[
        "Cleanliness",
        "No oil, oxide, paint, or mill scale; solvent wiped per process instructions",
        "Prevents porosity and incomplete fusion, especially critical for GTAW/GMAW on aluminum",
    ],
    &[
        "Filler verification",
        "Filler classification, diameter, heat/lot match WPS and MIL filler list",
        "Ensures mechanical properties and corrosion resistance align with base metal",
    ],
    &[
        "Preheat/interpass",
        "Measured with contact pyrometer or temp stick; documented within WPS limits",
        "Prevents hydrogen cracking and controls distortion",
    ],
    &[
        "Shielding gas",
        "Type, purity, flow rate per WPS; hoses purged; dew point controlled for aluminum",
        "Protects molten pool from contamination and nitrogen/oxygen pickup",
    ],
    &[
        "Visual weld quality",
        "Bead profile, reinforcement, undercut, arc strikes, overlap within acceptance per MIL-STD-248D",
        "Visual cues often correlate with internal quality and dimensional control",
    ],
    &[
        "Dimensional/GD&T",
        "Flatness, perpendicularity, hole position check against drawing feature control frames",
        "Assures assembly interchangeability and fit for bonded/brazed structures",
    ],
];

pub(super) const WELDING_LIMITATIONS: &[&[&str]] = &[
    &[
        "GTAW",
        "Sheet, tube, light gauge extrusions",
        "All (1G/2G/3G/4G, 1F-4F)",
        "Use direct current electrode negative for most alloys; AC with balance control for aluminum; backing or purge required on full-penetration joints",
    ],
    &[
        "GMAW-P",
        "Sheet and thin plate with spray or pulsed transfer",
        "Flat, horizontal, limited vertical-up",
        "Preferred for controlled heat input; short-circuit only where allowed by WPS for thin gage and fillets",
    ],
    &[
        "FCAW-G",
        "Structural shapes, thicker sheet assemblies",
        "All position with appropriate classification",
        "Requires external shielding; restrict for thin sheet due to higher heat and spatter",
    ],
    &[
        "Brazing (torch/furnace)",
        "Lap joints, hem flanges, honeycomb core skins",
        "Primarily flat/fixtured",
        "Gap uniformity critical; flux selection and post-cleaning per filler manufacturer and spec",
    ],
];

pub(super) const MATERIAL_THICKNESS_LIMITS: &[&[&str]] = &[
    &[
        "GTAW",
        "0.020 in to 0.500 in depending on test coupon",
        "Use backing for full-penetration under 0.125 in; pulse recommended for thin aluminum",
    ],
    &[
        "GMAW-P",
        "0.063 in to 0.750 in",
        "Spray/pulsed transfer for >0.125 in; short-circuit limited to sheet if procedure qualified",
    ],
    &[
        "Brazing",
        "0.010 in to 0.125 in typical for sheet lap joints",
        "Control joint gap (0.002-0.006 in) and capillary action; thicker sections require soak control",
    ],
];

pub(super) const ASSEMBLY_TESTS: &[&[&str]] = &[
    &[
        "Macroetch",
        "Sectioned sample shows full penetration/filler distribution; fusion to root/backing",
        "Each procedure qualification and periodic audit per MIL-STD-248D",
    ],
    &[
        "Fillet break/face bend",
        "No open defects >1/8 in; sound fusion at root",
        "Performance qualification for fillet positions",
    ],
    &[
        "Proof/pressure test",
        "Leak-tight to drawing requirement (e.g., 1.5x design pressure)",
        "Tanks/ducting; procedure demonstration",
    ],
];

pub(super) const FILLER_COMBINATIONS: &[&[&str]] = &[
    &["Carbon steel", "ER70S-6 / E7018", "GMAW / SMAW", "Suitable for structural sheet; low hydrogen electrodes for restraint"],
    &["304/316 stainless", "ER308L / ER309L", "GTAW / GMAW-P", "Use ER309L when welding dissimilar or cladding"],
    &[
        "6061-T6",
        "ER4043 (general), ER5356 (higher strength)",
        "GTAW / GMAW",
        "Avoid ER5356 if service >150°F where stress corrosion risk exists",
    ],
    &[
        "Nickel alloys",
        "ERNiCr-3; BNi-2 for brazing",
        "GTAW / Brazing",
        "Maintain inert backing; control heat input for precipitate-hardened grades",
    ],
];

pub(super) const QUALIFICATION_LIMITS: &[&[&str]] = &[
    &[
        "Groove weld procedure",
        "Qualified thickness range per coupon (e.g., 0.250 in qualifies 0.125-0.500 in); position qualified separately",
    ],
    &["Fillet weld performance", "Welder qualified for equal or smaller fillet size and same or easier position"],
    &[
        "Brazing procedure",
        "Qualified base-metal thickness ±50% of test coupon; joint type limited to tested configuration",
    ],
    &["Brazing performance", "Operator limited to process, filler, joint type, and base-metal thickness tested"],
];

pub(super) const PERFORMANCE_EVALUATION: &[&[&str]] = &[
    &["Visual examination", "No cracks, lack of fusion, excessive reinforcement, or undercut per acceptance criteria"],
    &["Bend tests", "Root/face bends with no open defects >1/8 in in tensile surface"],
    &["Radiography/UT", "Where specified for critical joints; must meet volumetric acceptance per MIL-STD-248D"],
];

pub(super) const BRAZING_REQUIREMENTS: &[&[&str]] = &[
    &["Base material cleanliness", "Oxide removal and solvent cleaning immediately prior to brazing; avoid chloride residues"],
    &["Brazing alloy", "BNi-2 for nickel alloys; BAlSi-4/BAlSi-1 for aluminum; follow flow/clearance guidance"],
    &["Flux/atmosphere", "Use appropriate flux for torch brazing; vacuum or argon for furnace/inert brazing"],
    &["Post-braze cleaning", "Remove flux residues; inspect for voids and flow completeness via section or NDI"],
];

pub(super) const BRAZING_QUALIFICATION: &[&[&str]] = &[
    &["Brazing alloys for PQ", "Use production filler type and thickness range; document heat/lot"],
    &["Performance test specimens", "Lap shear coupons sized to joint design; furnace/torch cycle recorded"],
    &["Thickness qualified", "Test coupon thickness qualifies 0.5x to 2x of tested thickness for same alloy family"],
    &[
        "Axial load / torque",
        "Demonstrate joint can meet calculated load or torque from design allowables; fixture and record peak values",
    ],
];

pub(super) const GDT_CALLOUTS: &[&[&str]] = &[
    &["Flatness (⏤)", "Control skin panels after brazing to prevent oil-canning"],
    &["Perpendicularity (⊥)", "Maintain flange-to-web alignment on formed channels"],
    &["Position (⌖)", "Locate pierced holes for fasteners and brazed inserts"],
    &["Profile of a surface (⌓)", "Capture aerodynamic surface after forming/brazing"],
];
