//! Standard drag tables: drag coefficient versus Mach number.

use crate::DragPoint;

/// G1 (flat-base, Ingalls) reference projectile.
pub static G1_TABLE: [DragPoint; 79] = [
    DragPoint::new(0.00, 0.2629), DragPoint::new(0.05, 0.2558), DragPoint::new(0.10, 0.2487), DragPoint::new(0.15, 0.2413),
    DragPoint::new(0.20, 0.2344), DragPoint::new(0.25, 0.2278), DragPoint::new(0.30, 0.2214), DragPoint::new(0.35, 0.2155),
    DragPoint::new(0.40, 0.2104), DragPoint::new(0.45, 0.2061), DragPoint::new(0.50, 0.2032), DragPoint::new(0.55, 0.2020),
    DragPoint::new(0.60, 0.2034), DragPoint::new(0.70, 0.2165), DragPoint::new(0.725, 0.2230), DragPoint::new(0.75, 0.2313),
    DragPoint::new(0.775, 0.2417), DragPoint::new(0.80, 0.2546), DragPoint::new(0.825, 0.2706), DragPoint::new(0.85, 0.2901),
    DragPoint::new(0.875, 0.3136), DragPoint::new(0.90, 0.3415), DragPoint::new(0.925, 0.3734), DragPoint::new(0.95, 0.4084),
    DragPoint::new(0.975, 0.4448), DragPoint::new(1.0, 0.4805), DragPoint::new(1.025, 0.5136), DragPoint::new(1.05, 0.5427),
    DragPoint::new(1.075, 0.5677), DragPoint::new(1.10, 0.5883), DragPoint::new(1.125, 0.6053), DragPoint::new(1.15, 0.6191),
    DragPoint::new(1.20, 0.6393), DragPoint::new(1.25, 0.6518), DragPoint::new(1.30, 0.6589), DragPoint::new(1.35, 0.6621),
    DragPoint::new(1.40, 0.6625), DragPoint::new(1.45, 0.6607), DragPoint::new(1.50, 0.6573), DragPoint::new(1.55, 0.6528),
    DragPoint::new(1.60, 0.6474), DragPoint::new(1.65, 0.6413), DragPoint::new(1.70, 0.6347), DragPoint::new(1.75, 0.6280),
    DragPoint::new(1.80, 0.6210), DragPoint::new(1.85, 0.6141), DragPoint::new(1.90, 0.6072), DragPoint::new(1.95, 0.6003),
    DragPoint::new(2.00, 0.5934), DragPoint::new(2.05, 0.5867), DragPoint::new(2.10, 0.5804), DragPoint::new(2.15, 0.5743),
    DragPoint::new(2.20, 0.5685), DragPoint::new(2.25, 0.5630), DragPoint::new(2.30, 0.5577), DragPoint::new(2.35, 0.5527),
    DragPoint::new(2.40, 0.5481), DragPoint::new(2.45, 0.5438), DragPoint::new(2.50, 0.5397), DragPoint::new(2.60, 0.5325),
    DragPoint::new(2.70, 0.5264), DragPoint::new(2.80, 0.5211), DragPoint::new(2.90, 0.5168), DragPoint::new(3.00, 0.5133),
    DragPoint::new(3.10, 0.5105), DragPoint::new(3.20, 0.5084), DragPoint::new(3.30, 0.5067), DragPoint::new(3.40, 0.5054),
    DragPoint::new(3.50, 0.5040), DragPoint::new(3.60, 0.5030), DragPoint::new(3.70, 0.5022), DragPoint::new(3.80, 0.5016),
    DragPoint::new(3.90, 0.5010), DragPoint::new(4.00, 0.5006), DragPoint::new(4.20, 0.4998), DragPoint::new(4.40, 0.4995),
    DragPoint::new(4.60, 0.4992), DragPoint::new(4.80, 0.4990), DragPoint::new(5.00, 0.4988),
];

/// G7 (long boat-tail) reference projectile.
pub static G7_TABLE: [DragPoint; 84] = [
    DragPoint::new(0.00, 0.1198), DragPoint::new(0.05, 0.1197), DragPoint::new(0.10, 0.1196), DragPoint::new(0.15, 0.1194),
    DragPoint::new(0.20, 0.1193), DragPoint::new(0.25, 0.1194), DragPoint::new(0.30, 0.1194), DragPoint::new(0.35, 0.1194),
    DragPoint::new(0.40, 0.1193), DragPoint::new(0.45, 0.1193), DragPoint::new(0.50, 0.1194), DragPoint::new(0.55, 0.1193),
    DragPoint::new(0.60, 0.1194), DragPoint::new(0.65, 0.1197), DragPoint::new(0.70, 0.1202), DragPoint::new(0.725, 0.1207),
    DragPoint::new(0.75, 0.1215), DragPoint::new(0.775, 0.1226), DragPoint::new(0.80, 0.1242), DragPoint::new(0.825, 0.1266),
    DragPoint::new(0.85, 0.1306), DragPoint::new(0.875, 0.1368), DragPoint::new(0.90, 0.1464), DragPoint::new(0.925, 0.1660),
    DragPoint::new(0.95, 0.2054), DragPoint::new(0.975, 0.2993), DragPoint::new(1.0, 0.3803), DragPoint::new(1.025, 0.4015),
    DragPoint::new(1.05, 0.4043), DragPoint::new(1.075, 0.4034), DragPoint::new(1.10, 0.4014), DragPoint::new(1.125, 0.3987),
    DragPoint::new(1.15, 0.3955), DragPoint::new(1.20, 0.3884), DragPoint::new(1.25, 0.3810), DragPoint::new(1.30, 0.3732),
    DragPoint::new(1.35, 0.3657), DragPoint::new(1.40, 0.3580), DragPoint::new(1.50, 0.3440), DragPoint::new(1.55, 0.3376),
    DragPoint::new(1.60, 0.3315), DragPoint::new(1.65, 0.3260), DragPoint::new(1.70, 0.3209), DragPoint::new(1.75, 0.3160),
    DragPoint::new(1.80, 0.3117), DragPoint::new(1.85, 0.3078), DragPoint::new(1.90, 0.3042), DragPoint::new(1.95, 0.3010),
    DragPoint::new(2.00, 0.2980), DragPoint::new(2.05, 0.2951), DragPoint::new(2.10, 0.2922), DragPoint::new(2.15, 0.2892),
    DragPoint::new(2.20, 0.2864), DragPoint::new(2.25, 0.2835), DragPoint::new(2.30, 0.2807), DragPoint::new(2.35, 0.2779),
    DragPoint::new(2.40, 0.2752), DragPoint::new(2.45, 0.2725), DragPoint::new(2.50, 0.2697), DragPoint::new(2.55, 0.2670),
    DragPoint::new(2.60, 0.2643), DragPoint::new(2.65, 0.2615), DragPoint::new(2.70, 0.2588), DragPoint::new(2.75, 0.2561),
    DragPoint::new(2.80, 0.2533), DragPoint::new(2.85, 0.2506), DragPoint::new(2.90, 0.2479), DragPoint::new(2.95, 0.2451),
    DragPoint::new(3.00, 0.2424), DragPoint::new(3.10, 0.2368), DragPoint::new(3.20, 0.2313), DragPoint::new(3.30, 0.2258),
    DragPoint::new(3.40, 0.2205), DragPoint::new(3.50, 0.2154), DragPoint::new(3.60, 0.2106), DragPoint::new(3.70, 0.2060),
    DragPoint::new(3.80, 0.2017), DragPoint::new(3.90, 0.1975), DragPoint::new(4.00, 0.1935), DragPoint::new(4.20, 0.1861),
    DragPoint::new(4.40, 0.1793), DragPoint::new(4.60, 0.1730), DragPoint::new(4.80, 0.1672), DragPoint::new(5.00, 0.1618),
];
