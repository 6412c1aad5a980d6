//! Prompt templates for the two collaborators.
//!
//! The templates instruct the model to respond with a bare JSON document
//! matching the verdict schema. Field names in the instructions must stay
//! in sync with the serde representations of
//! [`crate::face::FaceVerdict`] and [`crate::attendance::ConstraintVerdict`].

use crate::attendance::AttendanceAttempt;

/// Instruction text preceding the two face images.
pub(crate) const FACE_MATCH: &str = "\
You are a highly accurate AI face verification system. Your task is to compare \
two images of a person's face and determine if they are the same person.

You will be given a registered face image and a current face image for verification.

Analyze the key facial features in both images (e.g., eyes, nose, mouth, jawline, \
and overall face structure).

- If the faces are a clear match, set 'isMatch' to true and provide a high \
confidence score (e.g., > 0.9).
- If the faces are clearly different, set 'isMatch' to false, provide a low \
confidence score, and a brief reason for the mismatch.
- If the comparison is ambiguous due to factors like poor lighting, different \
angles, or obstructions, set 'isMatch' to false, provide a moderate confidence \
score, and state the reason for the ambiguity.

Respond in JSON format with fields: isMatch (boolean), confidence (number 0-1), \
reason (string).";

/// Render the constraint-validation prompt for an attendance attempt.
pub(crate) fn constraint_validation(attempt: &AttendanceAttempt) -> String {
    format!(
        "\
You are an AI assistant that validates student attendance based on location and \
time constraints.

Here's the student's location data (a base64 JSON data URI with latitude and \
longitude):
{location}

Here's the class schedule:
Start Time: {start}
End Time: {end}

Current Time: {now}

Determine if the student is within college premises and if the current time is \
within the scheduled class time.

If the student is not within the specified location or the time is outside the \
class schedule, set isValid to false, provide a reason, set logAttempt to true, \
and classify the attempt.

If the student is within the specified location and the time is within the class \
schedule, set isValid to true, and logAttempt to false.

Respond in JSON format with fields: isValid (boolean), reason (string), \
logAttempt (boolean), classification (string).",
        location = attempt.location_data_uri,
        start = attempt.scheduled_start_time.to_rfc3339(),
        end = attempt.scheduled_end_time.to_rfc3339(),
        now = attempt.timestamp.to_rfc3339(),
    )
}
