//! The annual meteor-shower working list.
//!
//! A fixed table: shower radiants drift little year to year and the
//! engine's radiant markers do not need per-year ephemerides. Activity
//! windows are closed calendar intervals that may wrap the year boundary
//! (the Quadrantids run late December into January); the wraparound is
//! handled explicitly in [`MeteorShower::is_active_on`].

use serde::{Deserialize, Serialize};

/// A calendar day-of-year as (month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// Orders days within one calendar year.
    fn ordinal(&self) -> u32 {
        self.month * 32 + self.day
    }
}

/// One annual meteor shower.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeteorShower {
    pub id: &'static str,
    pub name: &'static str,
    pub peak: MonthDay,
    pub active_start: MonthDay,
    pub active_end: MonthDay,
    /// Zenithal hourly rate at peak.
    pub zhr: u32,
    pub radiant_ra_hours: f64,
    pub radiant_dec_deg: f64,
    pub parent_body: &'static str,
    pub speed_km_s: f64,
}

impl MeteorShower {
    /// True when `(month, day)` falls inside the closed activity window.
    ///
    /// Windows with `start > end` wrap the year boundary: active when the
    /// date is on either side of the wrap.
    pub fn is_active_on(&self, month: u32, day: u32) -> bool {
        let date = MonthDay::new(month, day).ordinal();
        let start = self.active_start.ordinal();
        let end = self.active_end.ordinal();
        if start <= end {
            (start..=end).contains(&date)
        } else {
            date >= start || date <= end
        }
    }
}

/// The built-in shower list: the major annual showers of the IMO working
/// list, radiants at peak.
pub const METEOR_SHOWERS: [MeteorShower; 10] = [
    MeteorShower {
        id: "QUA",
        name: "Quadrantids",
        peak: MonthDay::new(1, 3),
        active_start: MonthDay::new(12, 28),
        active_end: MonthDay::new(1, 12),
        zhr: 110,
        radiant_ra_hours: 15.3,
        radiant_dec_deg: 49.5,
        parent_body: "2003 EH1",
        speed_km_s: 41.0,
    },
    MeteorShower {
        id: "LYR",
        name: "Lyrids",
        peak: MonthDay::new(4, 22),
        active_start: MonthDay::new(4, 14),
        active_end: MonthDay::new(4, 30),
        zhr: 18,
        radiant_ra_hours: 18.07,
        radiant_dec_deg: 33.3,
        parent_body: "C/1861 G1 Thatcher",
        speed_km_s: 49.0,
    },
    MeteorShower {
        id: "ETA",
        name: "Eta Aquariids",
        peak: MonthDay::new(5, 6),
        active_start: MonthDay::new(4, 19),
        active_end: MonthDay::new(5, 28),
        zhr: 50,
        radiant_ra_hours: 22.47,
        radiant_dec_deg: -1.0,
        parent_body: "1P/Halley",
        speed_km_s: 66.0,
    },
    MeteorShower {
        id: "SDA",
        name: "Southern Delta Aquariids",
        peak: MonthDay::new(7, 30),
        active_start: MonthDay::new(7, 12),
        active_end: MonthDay::new(8, 23),
        zhr: 25,
        radiant_ra_hours: 22.7,
        radiant_dec_deg: -16.4,
        parent_body: "96P/Machholz",
        speed_km_s: 41.0,
    },
    MeteorShower {
        id: "PER",
        name: "Perseids",
        peak: MonthDay::new(8, 12),
        active_start: MonthDay::new(7, 17),
        active_end: MonthDay::new(8, 24),
        zhr: 100,
        radiant_ra_hours: 3.2,
        radiant_dec_deg: 58.0,
        parent_body: "109P/Swift-Tuttle",
        speed_km_s: 59.0,
    },
    MeteorShower {
        id: "ORI",
        name: "Orionids",
        peak: MonthDay::new(10, 21),
        active_start: MonthDay::new(10, 2),
        active_end: MonthDay::new(11, 7),
        zhr: 20,
        radiant_ra_hours: 6.35,
        radiant_dec_deg: 15.6,
        parent_body: "1P/Halley",
        speed_km_s: 66.0,
    },
    MeteorShower {
        id: "STA",
        name: "Southern Taurids",
        peak: MonthDay::new(11, 5),
        active_start: MonthDay::new(9, 10),
        active_end: MonthDay::new(11, 20),
        zhr: 5,
        radiant_ra_hours: 3.55,
        radiant_dec_deg: 13.6,
        parent_body: "2P/Encke",
        speed_km_s: 27.0,
    },
    MeteorShower {
        id: "LEO",
        name: "Leonids",
        peak: MonthDay::new(11, 17),
        active_start: MonthDay::new(11, 6),
        active_end: MonthDay::new(11, 30),
        zhr: 15,
        radiant_ra_hours: 10.27,
        radiant_dec_deg: 21.6,
        parent_body: "55P/Tempel-Tuttle",
        speed_km_s: 71.0,
    },
    MeteorShower {
        id: "GEM",
        name: "Geminids",
        peak: MonthDay::new(12, 14),
        active_start: MonthDay::new(12, 4),
        active_end: MonthDay::new(12, 20),
        zhr: 150,
        radiant_ra_hours: 7.55,
        radiant_dec_deg: 32.3,
        parent_body: "3200 Phaethon",
        speed_km_s: 35.0,
    },
    MeteorShower {
        id: "URS",
        name: "Ursids",
        peak: MonthDay::new(12, 22),
        active_start: MonthDay::new(12, 17),
        active_end: MonthDay::new(12, 26),
        zhr: 10,
        radiant_ra_hours: 14.47,
        radiant_dec_deg: 75.4,
        parent_body: "8P/Tuttle",
        speed_km_s: 33.0,
    },
];
