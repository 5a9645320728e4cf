//! Protocol error codes reported inside the result envelope

use std::collections::HashMap;
use std::sync::LazyLock;

/// A non-zero error code reported by the server in an otherwise well-formed
/// result envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct ProtocolError {
    /// The numeric code from `<error code="..."/>`.
    pub code: i32,
    /// Human-readable description looked up from the code table.
    pub message: &'static str,
}

impl ProtocolError {
    /// Builds the error for `code`, resolving its message from the code table.
    pub fn from_code(code: i32) -> Self {
        Self {
            code,
            message: error_message(code),
        }
    }
}

/// Returns the description for a server error code.
///
/// Codes missing from the table map to `"Unknown error"`.
pub fn error_message(code: i32) -> &'static str {
    ERROR_MESSAGES.get(&code).copied().unwrap_or("Unknown error")
}

static ERROR_MESSAGES: LazyLock<HashMap<i32, &'static str>> =
    LazyLock::new(|| ERROR_CODES.iter().copied().collect());

const ERROR_CODES: &[(i32, &str)] = &[
    (-1, "Unknown error"),
    (0, "No error"),
    (1, "User canceled action"),
    (2, "Memory error"),
    (3, "Command is unavailable"),
    (4, "Command is unknown"),
    (5, "Command is invalid"),
    (6, "File is read-only"),
    (7, "Running out of memory"),
    (8, "Empty result"),
    (9, "Insufficient privileges"),
    (10, "Requested data is missing"),
    (11, "Name is not valid"),
    (12, "Name already exists"),
    (13, "File or object is in use"),
    (14, "Out of range"),
    (15, "Can't divide by zero"),
    (16, "Operation failed, request retry"),
    (17, "Attempt to convert foreign character set to UTF-16 failed"),
    (18, "Client must provide account information to proceed"),
    (19, "String contains characters other than A-Z, a-z, 0-9 (ASCII)"),
    (20, "Command or operation canceled by triggered script"),
    (21, "Request not supported"),
    (100, "File is missing"),
    (101, "Record is missing"),
    (102, "Field is missing"),
    (103, "Relationship is missing"),
    (104, "Script is missing"),
    (105, "Layout is missing"),
    (106, "Table is missing"),
    (107, "Index is missing"),
    (108, "Value list is missing"),
    (109, "Privilege set is missing"),
    (110, "Related tables are missing"),
    (111, "Field repetition is invalid"),
    (112, "Window is missing"),
    (113, "Function is missing"),
    (114, "File reference is missing"),
    (115, "Menu set is missing"),
    (116, "Layout object is missing"),
    (117, "Data source is missing"),
    (130, "Files are damaged or missing and must be reinstalled"),
    (131, "Language pack files are missing"),
    (200, "Record access is denied"),
    (201, "Field cannot be modified"),
    (202, "Field access is denied"),
    (203, "No records in file to print, or password doesn't allow print access"),
    (204, "No access to field(s) in sort order"),
    (205, "User does not have access privileges to create new records"),
    (206, "User does not have password change privileges, or file is not modifiable"),
    (207, "User does not have privileges to change database schema, or file is not modifiable"),
    (208, "Password does not contain enough characters"),
    (209, "New password must be different from existing one"),
    (210, "User account is inactive"),
    (211, "Password has expired"),
    (212, "Invalid user account and/or password"),
    (213, "User account and/or password does not exist"),
    (214, "Too many login attempts"),
    (215, "Administrator privileges cannot be duplicated"),
    (216, "Guest account cannot be duplicated"),
    (217, "User does not have sufficient privileges to modify administrator account"),
    (218, "Password and verify password do not match"),
    (300, "File is locked or in use"),
    (301, "Record is in use by another user"),
    (302, "Table is in use by another user"),
    (303, "Database schema is in use by another user"),
    (304, "Layout is in use by another user"),
    (306, "Record modification ID does not match"),
    (307, "Transaction could not be locked because of a communication error with the host"),
    (400, "Find criteria are empty"),
    (401, "No records match the request"),
    (402, "Selected field is not a match field for a lookup"),
    (404, "Sort order is invalid"),
    (405, "Number of records specified exceeds number of records that can be omitted"),
    (406, "Replace/reserialize criteria are invalid"),
    (407, "One or both match fields are missing (invalid relationship)"),
    (408, "Specified field has inappropriate data type for this operation"),
    (409, "Import order is invalid"),
    (410, "Export order is invalid"),
    (412, "Wrong version of FileMaker used to recover file"),
    (413, "Specified field has inappropriate field type"),
    (414, "Layout cannot display the result"),
    (415, "One or more required related records are not available"),
    (416, "A primary key is required from the data source table"),
    (417, "File is not a supported data source"),
    (418, "Internal failure in INSERT operation into a field"),
    (500, "Date value does not meet validation entry options"),
    (501, "Time value does not meet validation entry options"),
    (502, "Number value does not meet validation entry options"),
    (503, "Value in field is not within the range specified in validation entry options"),
    (504, "Value in field is not unique, as required in validation entry options"),
    (505, "Value in field is not an existing value in the file, as required in validation entry options"),
    (506, "Value in field is not listed in the value list specified in validation entry option"),
    (507, "Value in field failed calculation test of validation entry option"),
    (508, "Invalid value entered in Find mode"),
    (509, "Field requires a valid value"),
    (510, "Related value is empty or unavailable"),
    (511, "Value in field exceeds maximum field size"),
    (512, "Record was already modified by another user"),
    (513, "No validation was specified but data cannot fit into the field"),
    (800, "Unable to create file on disk"),
    (801, "Unable to create temporary file on System disk"),
    (802, "Unable to open file"),
    (803, "File is single-user, or host cannot be found"),
    (804, "File cannot be opened as read-only in its current state"),
    (805, "File is damaged; use Recover command"),
    (806, "File cannot be opened with this version of the client"),
    (807, "File is not a database file or is severely damaged"),
    (808, "Cannot open file because access privileges are damaged"),
    (809, "Disk/volume is full"),
    (810, "Disk/volume is locked"),
    (811, "Temporary file cannot be opened as a database file"),
    (812, "Exceeded host's capacity"),
    (813, "Record synchronization error on network"),
    (814, "File(s) cannot be opened because maximum number is open"),
    (815, "Couldn't open lookup file"),
    (816, "Unable to convert file"),
    (817, "Unable to open file because it does not belong to this solution"),
    (819, "Cannot save a local copy of a remote file"),
    (820, "File is being closed"),
    (821, "Host forced a disconnect"),
    (823, "Cannot set file to single-user; guests are connected"),
    (824, "File is damaged or not a database file"),
    (825, "File is not authorized to reference the protected file"),
    (826, "File path specified is not a valid file path"),
    (850, "Path is not valid for the operating system"),
    (851, "Cannot delete an external file from disk"),
    (852, "Cannot write a file to the external storage"),
    (853, "One or more containers failed to transfer"),
    (903, "Command cannot be used in a shared file"),
    (905, "Command requires a field to be active"),
    (906, "Current file is not shared; command can be used only if the file is shared"),
    (951, "An unexpected error occurred"),
    (954, "Unsupported XML grammar"),
    (955, "No database name"),
    (956, "Maximum number of database sessions exceeded"),
    (957, "Conflicting commands"),
    (958, "Parameter missing"),
    (959, "Custom Web Publishing technology is disabled"),
    (960, "Parameter is invalid"),
];
