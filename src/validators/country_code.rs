//! ISO 3166-1 country code validation.
//!
//! A country attribute may carry the alpha-2 code (`US`), the alpha-3 code
//! (`USA`) or the three-digit numeric code (`840`). Alphabetic codes are
//! matched case-insensitively since SCIM declares `addresses.country` with
//! `caseExact: false`.

use std::fmt;

/// One ISO 3166-1 entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryCode {
    /// Alpha-2 code
    pub alpha2: &'static str,
    /// Alpha-3 code
    pub alpha3: &'static str,
    /// Numeric code
    pub numeric: u16,
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alpha2)
    }
}

/// Value is not an assigned ISO 3166-1 code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not an ISO 3166-1 alpha-2, alpha-3 or numeric country code")]
pub struct CountryCodeError {
    pub value: String,
}

/// Look up `value` as an alpha-2, alpha-3 or numeric code.
pub fn validate_country_code(value: &str) -> Result<&'static CountryCode, CountryCodeError> {
    let found = match value.len() {
        2 => COUNTRIES
            .iter()
            .find(|country| country.alpha2.eq_ignore_ascii_case(value)),
        3 if value.bytes().all(|b| b.is_ascii_digit()) => value
            .parse::<u16>()
            .ok()
            .and_then(|numeric| COUNTRIES.iter().find(|country| country.numeric == numeric)),
        3 => COUNTRIES
            .iter()
            .find(|country| country.alpha3.eq_ignore_ascii_case(value)),
        _ => None,
    };
    found.ok_or_else(|| CountryCodeError {
        value: value.to_string(),
    })
}

const fn c(alpha2: &'static str, alpha3: &'static str, numeric: u16) -> CountryCode {
    CountryCode {
        alpha2,
        alpha3,
        numeric,
    }
}

/// Officially assigned ISO 3166-1 codes.
pub static COUNTRIES: &[CountryCode] = &[
    c("AD", "AND", 20),
    c("AE", "ARE", 784),
    c("AF", "AFG", 4),
    c("AG", "ATG", 28),
    c("AI", "AIA", 660),
    c("AL", "ALB", 8),
    c("AM", "ARM", 51),
    c("AO", "AGO", 24),
    c("AQ", "ATA", 10),
    c("AR", "ARG", 32),
    c("AS", "ASM", 16),
    c("AT", "AUT", 40),
    c("AU", "AUS", 36),
    c("AW", "ABW", 533),
    c("AX", "ALA", 248),
    c("AZ", "AZE", 31),
    c("BA", "BIH", 70),
    c("BB", "BRB", 52),
    c("BD", "BGD", 50),
    c("BE", "BEL", 56),
    c("BF", "BFA", 854),
    c("BG", "BGR", 100),
    c("BH", "BHR", 48),
    c("BI", "BDI", 108),
    c("BJ", "BEN", 204),
    c("BL", "BLM", 652),
    c("BM", "BMU", 60),
    c("BN", "BRN", 96),
    c("BO", "BOL", 68),
    c("BQ", "BES", 535),
    c("BR", "BRA", 76),
    c("BS", "BHS", 44),
    c("BT", "BTN", 64),
    c("BV", "BVT", 74),
    c("BW", "BWA", 72),
    c("BY", "BLR", 112),
    c("BZ", "BLZ", 84),
    c("CA", "CAN", 124),
    c("CC", "CCK", 166),
    c("CD", "COD", 180),
    c("CF", "CAF", 140),
    c("CG", "COG", 178),
    c("CH", "CHE", 756),
    c("CI", "CIV", 384),
    c("CK", "COK", 184),
    c("CL", "CHL", 152),
    c("CM", "CMR", 120),
    c("CN", "CHN", 156),
    c("CO", "COL", 170),
    c("CR", "CRI", 188),
    c("CU", "CUB", 192),
    c("CV", "CPV", 132),
    c("CW", "CUW", 531),
    c("CX", "CXR", 162),
    c("CY", "CYP", 196),
    c("CZ", "CZE", 203),
    c("DE", "DEU", 276),
    c("DJ", "DJI", 262),
    c("DK", "DNK", 208),
    c("DM", "DMA", 212),
    c("DO", "DOM", 214),
    c("DZ", "DZA", 12),
    c("EC", "ECU", 218),
    c("EE", "EST", 233),
    c("EG", "EGY", 818),
    c("EH", "ESH", 732),
    c("ER", "ERI", 232),
    c("ES", "ESP", 724),
    c("ET", "ETH", 231),
    c("FI", "FIN", 246),
    c("FJ", "FJI", 242),
    c("FK", "FLK", 238),
    c("FM", "FSM", 583),
    c("FO", "FRO", 234),
    c("FR", "FRA", 250),
    c("GA", "GAB", 266),
    c("GB", "GBR", 826),
    c("GD", "GRD", 308),
    c("GE", "GEO", 268),
    c("GF", "GUF", 254),
    c("GG", "GGY", 831),
    c("GH", "GHA", 288),
    c("GI", "GIB", 292),
    c("GL", "GRL", 304),
    c("GM", "GMB", 270),
    c("GN", "GIN", 324),
    c("GP", "GLP", 312),
    c("GQ", "GNQ", 226),
    c("GR", "GRC", 300),
    c("GS", "SGS", 239),
    c("GT", "GTM", 320),
    c("GU", "GUM", 316),
    c("GW", "GNB", 624),
    c("GY", "GUY", 328),
    c("HK", "HKG", 344),
    c("HM", "HMD", 334),
    c("HN", "HND", 340),
    c("HR", "HRV", 191),
    c("HT", "HTI", 332),
    c("HU", "HUN", 348),
    c("ID", "IDN", 360),
    c("IE", "IRL", 372),
    c("IL", "ISR", 376),
    c("IM", "IMN", 833),
    c("IN", "IND", 356),
    c("IO", "IOT", 86),
    c("IQ", "IRQ", 368),
    c("IR", "IRN", 364),
    c("IS", "ISL", 352),
    c("IT", "ITA", 380),
    c("JE", "JEY", 832),
    c("JM", "JAM", 388),
    c("JO", "JOR", 400),
    c("JP", "JPN", 392),
    c("KE", "KEN", 404),
    c("KG", "KGZ", 417),
    c("KH", "KHM", 116),
    c("KI", "KIR", 296),
    c("KM", "COM", 174),
    c("KN", "KNA", 659),
    c("KP", "PRK", 408),
    c("KR", "KOR", 410),
    c("KW", "KWT", 414),
    c("KY", "CYM", 136),
    c("KZ", "KAZ", 398),
    c("LA", "LAO", 418),
    c("LB", "LBN", 422),
    c("LC", "LCA", 662),
    c("LI", "LIE", 438),
    c("LK", "LKA", 144),
    c("LR", "LBR", 430),
    c("LS", "LSO", 426),
    c("LT", "LTU", 440),
    c("LU", "LUX", 442),
    c("LV", "LVA", 428),
    c("LY", "LBY", 434),
    c("MA", "MAR", 504),
    c("MC", "MCO", 492),
    c("MD", "MDA", 498),
    c("ME", "MNE", 499),
    c("MF", "MAF", 663),
    c("MG", "MDG", 450),
    c("MH", "MHL", 584),
    c("MK", "MKD", 807),
    c("ML", "MLI", 466),
    c("MM", "MMR", 104),
    c("MN", "MNG", 496),
    c("MO", "MAC", 446),
    c("MP", "MNP", 580),
    c("MQ", "MTQ", 474),
    c("MR", "MRT", 478),
    c("MS", "MSR", 500),
    c("MT", "MLT", 470),
    c("MU", "MUS", 480),
    c("MV", "MDV", 462),
    c("MW", "MWI", 454),
    c("MX", "MEX", 484),
    c("MY", "MYS", 458),
    c("MZ", "MOZ", 508),
    c("NA", "NAM", 516),
    c("NC", "NCL", 540),
    c("NE", "NER", 562),
    c("NF", "NFK", 574),
    c("NG", "NGA", 566),
    c("NI", "NIC", 558),
    c("NL", "NLD", 528),
    c("NO", "NOR", 578),
    c("NP", "NPL", 524),
    c("NR", "NRU", 520),
    c("NU", "NIU", 570),
    c("NZ", "NZL", 554),
    c("OM", "OMN", 512),
    c("PA", "PAN", 591),
    c("PE", "PER", 604),
    c("PF", "PYF", 258),
    c("PG", "PNG", 598),
    c("PH", "PHL", 608),
    c("PK", "PAK", 586),
    c("PL", "POL", 616),
    c("PM", "SPM", 666),
    c("PN", "PCN", 612),
    c("PR", "PRI", 630),
    c("PS", "PSE", 275),
    c("PT", "PRT", 620),
    c("PW", "PLW", 585),
    c("PY", "PRY", 600),
    c("QA", "QAT", 634),
    c("RE", "REU", 638),
    c("RO", "ROU", 642),
    c("RS", "SRB", 688),
    c("RU", "RUS", 643),
    c("RW", "RWA", 646),
    c("SA", "SAU", 682),
    c("SB", "SLB", 90),
    c("SC", "SYC", 690),
    c("SD", "SDN", 729),
    c("SE", "SWE", 752),
    c("SG", "SGP", 702),
    c("SH", "SHN", 654),
    c("SI", "SVN", 705),
    c("SJ", "SJM", 744),
    c("SK", "SVK", 703),
    c("SL", "SLE", 694),
    c("SM", "SMR", 674),
    c("SN", "SEN", 686),
    c("SO", "SOM", 706),
    c("SR", "SUR", 740),
    c("SS", "SSD", 728),
    c("ST", "STP", 678),
    c("SV", "SLV", 222),
    c("SX", "SXM", 534),
    c("SY", "SYR", 760),
    c("SZ", "SWZ", 748),
    c("TC", "TCA", 796),
    c("TD", "TCD", 148),
    c("TF", "ATF", 260),
    c("TG", "TGO", 768),
    c("TH", "THA", 764),
    c("TJ", "TJK", 762),
    c("TK", "TKL", 772),
    c("TL", "TLS", 626),
    c("TM", "TKM", 795),
    c("TN", "TUN", 788),
    c("TO", "TON", 776),
    c("TR", "TUR", 792),
    c("TT", "TTO", 780),
    c("TV", "TUV", 798),
    c("TW", "TWN", 158),
    c("TZ", "TZA", 834),
    c("UA", "UKR", 804),
    c("UG", "UGA", 800),
    c("UM", "UMI", 581),
    c("US", "USA", 840),
    c("UY", "URY", 858),
    c("UZ", "UZB", 860),
    c("VA", "VAT", 336),
    c("VC", "VCT", 670),
    c("VE", "VEN", 862),
    c("VG", "VGB", 92),
    c("VI", "VIR", 850),
    c("VN", "VNM", 704),
    c("VU", "VUT", 548),
    c("WF", "WLF", 876),
    c("WS", "WSM", 882),
    c("YE", "YEM", 887),
    c("YT", "MYT", 175),
    c("ZA", "ZAF", 710),
    c("ZM", "ZMB", 894),
    c("ZW", "ZWE", 716),
];
