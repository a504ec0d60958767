//! HCI error code table (Bluetooth core spec, error codes 0x00-0x3f).

/// Dense lookup table of standard HCI error names, indexed by error code.
///
/// Mirrors the Bluetooth core specification's error code table: codes 0x00
/// through 0x3f all have assigned names ("Reserved" for gaps in the
/// allocation); anything outside that range has no entry.
const ERROR_NAMES: [&str; 64] = [
    "Success",                                                        // 0x00
    "Unknown HCI Command",                                            // 0x01
    "Unknown Connection Identifier",                                  // 0x02
    "Hardware Failure",                                               // 0x03
    "Page Timeout",                                                   // 0x04
    "Authentication Failure",                                         // 0x05
    "PIN or Key Missing",                                              // 0x06
    "Memory Capacity Exceeded",                                       // 0x07
    "Connection Timeout",                                             // 0x08
    "Connection Limit Exceeded",                                      // 0x09
    "Synchronous Connection Limit to a Device Exceeded",              // 0x0a
    "ACL Connection Already Exists",                                  // 0x0b
    "Command Disallowed",                                             // 0x0c
    "Connection Rejected due to Limited Resources",                   // 0x0d
    "Connection Rejected due to Security Reasons",                    // 0x0e
    "Connection Rejected due to Unacceptable BD_ADDR",                // 0x0f
    "Connection Accept Timeout Exceeded",                             // 0x10
    "Unsupported Feature or Parameter Value",                         // 0x11
    "Invalid HCI Command Parameters",                                 // 0x12
    "Remote User Terminated Connection",                              // 0x13
    "Remote Device Terminated due to Low Resources",                  // 0x14
    "Remote Device Terminated due to Power Off",                      // 0x15
    "Connection Terminated By Local Host",                            // 0x16
    "Repeated Attempts",                                              // 0x17
    "Pairing Not Allowed",                                            // 0x18
    "Unknown LMP PDU",                                                // 0x19
    "Unsupported Remote Feature / Unsupported LMP Feature",           // 0x1a
    "SCO Offset Rejected",                                            // 0x1b
    "SCO Interval Rejected",                                          // 0x1c
    "SCO Air Mode Rejected",                                          // 0x1d
    "Invalid LMP Parameters",                                         // 0x1e
    "Unspecified Error",                                              // 0x1f
    "Unsupported LMP Parameter Value",                                // 0x20
    "Role Change Not Allowed",                                        // 0x21
    "LMP Response Timeout / LL Response Timeout",                     // 0x22
    "LMP Error Transaction Collision",                                // 0x23
    "LMP PDU Not Allowed",                                            // 0x24
    "Encryption Mode Not Acceptable",                                 // 0x25
    "Link Key cannot be Changed",                                     // 0x26
    "Requested QoS Not Supported",                                    // 0x27
    "Instant Passed",                                                 // 0x28
    "Pairing With Unit Key Not Supported",                            // 0x29
    "Different Transaction Collision",                                // 0x2a
    "Reserved",                                                       // 0x2b
    "QoS Unacceptable Parameter",                                     // 0x2c
    "QoS Rejected",                                                   // 0x2d
    "Channel Classification Not Supported",                           // 0x2e
    "Insufficient Security",                                          // 0x2f
    "Parameter Out Of Mandatory Range",                               // 0x30
    "Reserved",                                                       // 0x31
    "Role Switch Pending",                                            // 0x32
    "Reserved",                                                       // 0x33
    "Reserved Slot Violation",                                        // 0x34
    "Role Switch Failed",                                             // 0x35
    "Extended Inquiry Response Too Large",                            // 0x36
    "Secure Simple Pairing Not Supported By Host",                    // 0x37
    "Host Busy - Pairing",                                            // 0x38
    "Connection Rejected due to No Suitable Channel Found",           // 0x39
    "Controller Busy",                                                // 0x3a
    "Unacceptable Connection Interval",                               // 0x3b
    "Directed Advertising Timeout",                                   // 0x3c
    "Connection Terminated due to MIC Failure",                       // 0x3d
    "Connection Failed to be Established",                            // 0x3e
    "MAC Connection Failed",                                          // 0x3f
];

/// Look up the standard name for an HCI error/status code.
///
/// Returns `"Unknown"` for any code outside 0x00-0x3f.
pub fn error_name(code: u8) -> &'static str {
    ERROR_NAMES
        .get(code as usize)
        .copied()
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_zero() {
        assert_eq!(error_name(0x00), "Success");
    }

    #[test]
    fn known_table_boundary() {
        assert_eq!(error_name(0x3f), "MAC Connection Failed");
    }

    #[test]
    fn reserved_gap() {
        assert_eq!(error_name(0x2b), "Reserved");
    }

    #[test]
    fn out_of_range_is_unknown() {
        assert_eq!(error_name(0x40), "Unknown");
        assert_eq!(error_name(0xff), "Unknown");
    }

    #[test]
    fn every_code_has_some_name() {
        for code in 0x00..=0x3f {
            assert_ne!(error_name(code), "Unknown");
        }
    }
}
