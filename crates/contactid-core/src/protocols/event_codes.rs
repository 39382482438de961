//! Contact ID event code catalog.
//!
//! A static, process-wide lookup from the 3-digit event code to its
//! description. The map is built once on first use and never mutated; codes
//! missing from the catalog are normal and resolve to [`UNKNOWN_EVENT`].

use std::collections::HashMap;
use std::sync::LazyLock;

/// Description attached to codes absent from the catalog.
pub const UNKNOWN_EVENT: &str = "Unknown";

const CATALOG: &[(u16, &str)] = &[
    // Medical alarms
    (100, "Medical"),
    (101, "Personal emergency"),
    (102, "Fail to report in"),
    // Fire alarms
    (110, "Fire"),
    (111, "Smoke"),
    (112, "Combustion"),
    (113, "Water flow"),
    (114, "Heat"),
    (115, "Pull station"),
    (116, "Duct"),
    (117, "Flame"),
    (118, "Near alarm"),
    // Panic alarms
    (120, "Panic"),
    (121, "Duress"),
    (122, "Silent"),
    (123, "Audible"),
    (124, "Duress - access granted"),
    (125, "Duress - egress granted"),
    // Burglar alarms
    (130, "Burglary"),
    (131, "Perimeter"),
    (132, "Interior"),
    (133, "24 hour (safe)"),
    (134, "Entry/exit"),
    (135, "Day/night"),
    (136, "Outdoor"),
    (137, "Tamper"),
    (138, "Near alarm"),
    (139, "Intrusion verifier"),
    // General alarms
    (140, "General alarm"),
    (141, "Polling loop open"),
    (142, "Polling loop short"),
    (143, "Expansion module failure"),
    (144, "Sensor tamper"),
    (145, "Expansion module tamper"),
    (146, "Silent burglary"),
    (147, "Sensor supervision failure"),
    // 24 hour non-burglary
    (150, "24 hour non-burglary"),
    (151, "Gas detected"),
    (152, "Refrigeration"),
    (153, "Loss of heat"),
    (154, "Water leakage"),
    (155, "Foil break"),
    (156, "Day trouble"),
    (157, "Low bottled gas level"),
    (158, "High temperature"),
    (159, "Low temperature"),
    (161, "Loss of air flow"),
    (162, "Carbon monoxide detected"),
    (163, "Tank level"),
    // Fire supervisory
    (200, "Fire supervisory"),
    (201, "Low water pressure"),
    (202, "Low CO2"),
    (203, "Gate valve sensor"),
    (204, "Low water level"),
    (205, "Pump activated"),
    (206, "Pump failure"),
    // System troubles
    (300, "System trouble"),
    (301, "AC loss"),
    (302, "Low system battery"),
    (303, "RAM checksum bad"),
    (304, "ROM checksum bad"),
    (305, "System reset"),
    (306, "Panel programming changed"),
    (307, "Self-test failure"),
    (308, "System shutdown"),
    (309, "Battery test failure"),
    (310, "Ground fault"),
    (311, "Battery missing/dead"),
    (312, "Power supply overcurrent"),
    (313, "Engineer reset"),
    // Sounder/relay troubles
    (320, "Sounder/relay"),
    (321, "Bell 1"),
    (322, "Bell 2"),
    (323, "Alarm relay"),
    (324, "Trouble relay"),
    (325, "Reversing relay"),
    (326, "Notification appliance ckt. #3"),
    (327, "Notification appliance ckt. #4"),
    // System peripheral troubles
    (330, "System peripheral trouble"),
    (331, "Polling loop open"),
    (332, "Polling loop short"),
    (333, "Expansion module failure"),
    (334, "Repeater failure"),
    (335, "Local printer out of paper"),
    (336, "Local printer failure"),
    (337, "Exp. module DC loss"),
    (338, "Exp. module low battery"),
    (339, "Exp. module reset"),
    (341, "Exp. module tamper"),
    (342, "Exp. module AC loss"),
    (343, "Exp. module self-test fail"),
    (344, "RF receiver jam detect"),
    // Communication troubles
    (350, "Communication trouble"),
    (351, "Telco 1 fault"),
    (352, "Telco 2 fault"),
    (353, "Long range radio transmitter fault"),
    (354, "Failure to communicate event"),
    (355, "Loss of radio supervision"),
    (356, "Loss of central polling"),
    (357, "Long range radio VSWR problem"),
    // Protection loop troubles
    (370, "Protection loop"),
    (371, "Protection loop open"),
    (372, "Protection loop short"),
    (373, "Fire trouble"),
    (374, "Exit error alarm (zone)"),
    (375, "Panic zone trouble"),
    (376, "Hold-up zone trouble"),
    (377, "Swinger trouble"),
    (378, "Cross-zone trouble"),
    // Sensor troubles
    (380, "Sensor trouble"),
    (381, "Loss of supervision - RF"),
    (382, "Loss of supervision - RPM"),
    (383, "Sensor tamper"),
    (384, "RF low battery"),
    (385, "Smoke detector high sensitivity"),
    (386, "Smoke detector low sensitivity"),
    (387, "Intrusion detector high sensitivity"),
    (388, "Intrusion detector low sensitivity"),
    (389, "Sensor self-test failure"),
    (391, "Sensor watch trouble"),
    (392, "Drift compensation error"),
    (393, "Maintenance alert"),
    // Open/close
    (400, "Open/close"),
    (401, "O/C by user"),
    (402, "Group O/C"),
    (403, "Automatic O/C"),
    (404, "Late to O/C"),
    (405, "Deferred O/C"),
    (406, "Cancel"),
    (407, "Remote arm/disarm"),
    (408, "Quick arm"),
    (409, "Keyswitch O/C"),
    (441, "Armed STAY"),
    (442, "Keyswitch armed STAY"),
    // Remote access
    (411, "Callback request made"),
    (412, "Successful download/access"),
    (413, "Unsuccessful access"),
    (414, "System shutdown command received"),
    (415, "Dialer shutdown command received"),
    (416, "Successful upload"),
    // Access control
    (421, "Access denied"),
    (422, "Access report by user"),
    (423, "Forced access"),
    (424, "Egress denied"),
    (425, "Egress granted"),
    (426, "Access door propped open"),
    (427, "Access point door status monitor trouble"),
    (428, "Access point request to exit trouble"),
    (429, "Access program mode entry"),
    (430, "Access program mode exit"),
    (431, "Access threat level change"),
    (432, "Access relay/trigger fail"),
    (433, "Access RTE shunt"),
    (434, "Access DSM shunt"),
    // Special open/close
    (450, "Exception open/close"),
    (451, "Early O/C"),
    (452, "Late O/C"),
    (453, "Failed to open"),
    (454, "Failed to close"),
    (455, "Auto-arm failed"),
    (456, "Partial arm"),
    (457, "Exit error (user)"),
    (458, "User on premises"),
    (459, "Recent close"),
    (461, "Wrong code entry"),
    (462, "Legal code entry"),
    (463, "Re-arm after alarm"),
    (464, "Auto-arm time extended"),
    (465, "Panic alarm reset"),
    (466, "Service on/off premises"),
    // Bypasses and disables
    (501, "Access reader disable"),
    (520, "Sounder/relay disable"),
    (521, "Bell 1 disable"),
    (522, "Bell 2 disable"),
    (523, "Alarm relay disable"),
    (524, "Trouble relay disable"),
    (525, "Reversing relay disable"),
    (526, "Notification appliance ckt. #3 disable"),
    (527, "Notification appliance ckt. #4 disable"),
    (531, "Module added"),
    (532, "Module removed"),
    (551, "Dialer disabled"),
    (552, "Radio transmitter disabled"),
    (553, "Remote upload/download disabled"),
    (570, "Zone/sensor bypass"),
    (571, "Fire bypass"),
    (572, "24 hour zone bypass"),
    (573, "Burglar bypass"),
    (574, "Group bypass"),
    (575, "Swinger bypass"),
    (576, "Access zone shunt"),
    (577, "Access point bypass"),
    // Test/misc
    (601, "Manual trigger test report"),
    (602, "Periodic test report"),
    (603, "Periodic RF transmission"),
    (604, "Fire test"),
    (605, "Status report to follow"),
    (606, "Listen-in to follow"),
    (607, "Walk test mode"),
    (608, "Periodic test - system trouble present"),
    (609, "Video transmitter active"),
    (611, "Point tested OK"),
    (612, "Point not tested"),
    (613, "Intrusion zone walk tested"),
    (614, "Fire zone walk tested"),
    (615, "Panic zone walk tested"),
    (616, "Service request"),
    (621, "Event log reset"),
    (622, "Event log 50% full"),
    (623, "Event log 90% full"),
    (624, "Event log overflow"),
    (625, "Time/date reset"),
    (626, "Time/date inaccurate"),
    (627, "Program mode entry"),
    (628, "Program mode exit"),
    (629, "32 hour event log marker"),
    (630, "Schedule change"),
    (631, "Exception schedule change"),
    (632, "Access schedule change"),
    (654, "System inactivity"),
];

static EVENT_CODES: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| CATALOG.iter().copied().collect());

/// Resolve an event code to its catalog description.
///
/// # Examples
/// ```
/// use contactid_core::event_codes::{UNKNOWN_EVENT, describe};
///
/// assert_eq!(describe(627), "Program mode entry");
/// assert_eq!(describe(999), UNKNOWN_EVENT);
/// ```
pub fn describe(code: u16) -> &'static str {
    lookup(code).unwrap_or(UNKNOWN_EVENT)
}

/// Catalog lookup; `None` when the code is not catalogued.
pub fn lookup(code: u16) -> Option<&'static str> {
    EVENT_CODES.get(&code).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{CATALOG, UNKNOWN_EVENT, describe, lookup};

    #[test]
    fn catalog_codes_are_unique_three_digit_values() {
        let mut seen = HashSet::new();
        for (code, description) in CATALOG {
            assert!((100..=999).contains(code), "code {code} out of range");
            assert!(!description.is_empty());
            assert!(seen.insert(*code), "duplicate code {code}");
        }
    }

    #[test]
    fn known_codes_resolve() {
        assert_eq!(describe(130), "Burglary");
        assert_eq!(describe(401), "O/C by user");
        assert_eq!(lookup(145), Some("Expansion module tamper"));
    }

    #[test]
    fn unknown_code_is_not_an_error() {
        assert_eq!(lookup(0), None);
        assert_eq!(describe(0), UNKNOWN_EVENT);
        assert_eq!(describe(999), UNKNOWN_EVENT);
    }
}
