//! # Reports
//!
//! Human-readable rendering of decoded records. Every record implements
//! [`Display`](fmt::Display) as a multi-line report listing each field, with
//! [`NOT_AVAILABLE`] in place of absent values.

use core::fmt;

use crate::{
    constellation::ConstellationSlots,
    epoch::EpochSnapshot,
    nmea_content::{
        CalendarDate, Coordinate, FixMode, GgaRecord, GllRecord, GsaRecord, GsvRecord,
        PositioningMode, Quality, RmcRecord, SelectionMode, Status, TimeZone, UtcTime, VtgRecord,
        ZdaRecord,
    },
};

/// Text shown for absent fields.
pub const NOT_AVAILABLE: &str = "Not Available";

fn line<T: fmt::Display>(f: &mut fmt::Formatter<'_>, label: &str, value: Option<T>) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "  {label}: {value}"),
        None => writeln!(f, "  {label}: {NOT_AVAILABLE}"),
    }
}

fn hemisphere(is_positive: Option<bool>, positive: char, negative: char) -> Option<char> {
    is_positive.map(|p| if p { positive } else { negative })
}

impl fmt::Display for UtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:05.2} UTC", self.hour, self.minute, self.second)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hours < 0 { '-' } else { '+' };
        write!(f, "{sign}{:02}:{:02}", self.hours.abs(), self.minutes.abs())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}° ({}° {:.4}')", self.decimal, self.degrees, self.minutes)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Valid => "Valid",
            Status::Invalid => "Invalid",
            Status::Unknown => NOT_AVAILABLE,
        })
    }
}

impl fmt::Display for PositioningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PositioningMode::Autonomous => "Autonomous",
            PositioningMode::Differential => "Differential",
            PositioningMode::Estimated => "Estimated",
            PositioningMode::DataNotValid => "Data Not Valid",
            PositioningMode::Manual => "Manual",
            PositioningMode::Simulator => "Simulator",
            PositioningMode::Unknown => NOT_AVAILABLE,
        })
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quality::NoFix => "No Fix",
            Quality::GPSFix => "GPS Fix",
            Quality::DGPSFix => "DGPS Fix",
            Quality::PPSFix => "PPS Fix",
            Quality::RTK => "RTK",
            Quality::FloatRTK => "Float RTK",
            Quality::Estimated => "Estimated",
            Quality::Manual => "Manual",
            Quality::Simulation => "Simulation",
            Quality::Unknown => NOT_AVAILABLE,
        })
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectionMode::Manual => "Manual",
            SelectionMode::Automatic => "Automatic",
            SelectionMode::Unknown => NOT_AVAILABLE,
        })
    }
}

impl fmt::Display for FixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FixMode::NoFix => "No Fix",
            FixMode::Fix2D => "2D",
            FixMode::Fix3D => "3D",
            FixMode::Unknown => NOT_AVAILABLE,
        })
    }
}

impl fmt::Display for RmcRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RMC - Recommended Minimum Navigation Information")?;
        line(f, "Time", self.time.get())?;
        line(f, "Status", self.status.get())?;
        line(f, "Latitude", self.latitude.get())?;
        line(f, "Hemisphere", hemisphere(self.is_north.get(), 'N', 'S'))?;
        line(f, "Longitude", self.longitude.get())?;
        line(f, "Hemisphere", hemisphere(self.is_east.get(), 'E', 'W'))?;
        line(f, "Speed (knots)", self.speed_knots.get())?;
        line(f, "Course (degrees)", self.course.get())?;
        line(f, "Date", self.date.get())?;
        line(f, "Magnetic variation (degrees)", self.magnetic_variation.get())?;
        line(f, "Variation direction", hemisphere(self.is_magnetic_east.get(), 'E', 'W'))?;
        line(f, "Mode", self.mode.get())?;
        line(f, "Navigation status", self.nav_status.get())
    }
}

impl fmt::Display for GgaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GGA - Global Positioning System Fix Data")?;
        line(f, "Time", self.time.get())?;
        line(f, "Latitude", self.latitude.get())?;
        line(f, "Hemisphere", hemisphere(self.is_north.get(), 'N', 'S'))?;
        line(f, "Longitude", self.longitude.get())?;
        line(f, "Hemisphere", hemisphere(self.is_east.get(), 'E', 'W'))?;
        line(f, "Fix quality", self.fix_quality.get())?;
        line(f, "Satellites used", self.satellites_used.get())?;
        line(f, "HDOP", self.hdop.get())?;
        line(f, "Altitude (m)", self.altitude.get())?;
        line(f, "Geoid separation (m)", self.geoid_separation.get())?;
        line(f, "Differential age (s)", self.differential_age.get())?;
        line(f, "Differential station", self.differential_station.get())
    }
}

impl fmt::Display for GllRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GLL - Geographic Position - Latitude/Longitude")?;
        line(f, "Latitude", self.latitude.get())?;
        line(f, "Hemisphere", hemisphere(self.is_north.get(), 'N', 'S'))?;
        line(f, "Longitude", self.longitude.get())?;
        line(f, "Hemisphere", hemisphere(self.is_east.get(), 'E', 'W'))?;
        line(f, "Time", self.time.get())?;
        line(f, "Status", self.status.get())?;
        line(f, "Mode", self.mode.get())
    }
}

impl fmt::Display for VtgRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VTG - Track made good and Ground speed")?;
        line(f, "True course (degrees)", self.true_course.get())?;
        line(f, "Magnetic course (degrees)", self.magnetic_course.get())?;
        line(f, "Speed (knots)", self.speed_knots.get())?;
        line(f, "Speed (km/h)", self.speed_kmh.get())?;
        line(f, "Mode", self.mode.get())
    }
}

impl fmt::Display for ZdaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ZDA - Time & Date")?;
        line(f, "Time", self.time.get())?;
        line(f, "Date", self.date.get())?;
        line(f, "Local zone", self.timezone.get())
    }
}

impl fmt::Display for GsaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GSA - GNSS DOP and active satellites ({})", self.talker)?;
        line(f, "System ID", self.system_id.get())?;
        line(f, "Selection mode", self.selection_mode.get())?;
        line(f, "Fix mode", self.fix_mode.get())?;
        writeln!(f, "  Satellites used: {}", self.satellite_count())?;
        if !self.prns.is_empty() {
            let prns: Vec<String> = self.prns.iter().map(u16::to_string).collect();
            writeln!(f, "  PRNs: {}", prns.join(", "))?;
        }
        line(f, "PDOP", self.pdop.get())?;
        line(f, "HDOP", self.hdop.get())?;
        line(f, "VDOP", self.vdop.get())
    }
}

impl fmt::Display for GsvRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GSV - Satellites in View ({})", self.talker)?;
        line(f, "System ID", self.system_id.get())?;
        line(f, "Total messages", self.total_messages.get())?;
        line(f, "Message number", self.message_number.get())?;
        line(f, "Satellites in view", self.satellites_in_view.get())?;
        for satellite in &self.satellites {
            writeln!(f, "  Satellite PRN {}", satellite.prn)?;
            line(f, "  Elevation (degrees)", satellite.elevation.get())?;
            line(f, "  Azimuth (degrees)", satellite.azimuth.get())?;
            line(f, "  SNR (dB-Hz)", satellite.snr.get())?;
        }
        Ok(())
    }
}

impl fmt::Display for ConstellationSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gsa in &self.gsa {
            write!(f, "{gsa}")?;
        }
        for system in &self.gsv {
            for fragment in &system.fragments {
                write!(f, "{fragment}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for EpochSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Epoch {}", self.epoch)?;
        write!(f, "{}", self.rmc)?;
        write!(f, "{}", self.gga)?;
        write!(f, "{}", self.gll)?;
        write!(f, "{}", self.vtg)?;
        write!(f, "{}", self.zda)?;
        write!(f, "{}", self.constellations)
    }
}
