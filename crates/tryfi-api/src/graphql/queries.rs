// ── GraphQL documents ──
//
// Query and mutation bodies are assembled from shared fragments so the
// device and pet shapes stay identical across every call that returns them.

pub(crate) const FRAGMENT_USER_DETAILS: &str = "fragment UserDetails on User { \
    __typename id email firstName lastName phoneNumber fiNewsNotificationsEnabled chipReseller { __typename id } }";

pub(crate) const FRAGMENT_LED_DETAILS: &str =
    "fragment LedColorDetails on LedColor { __typename ledColorCode hexCode name }";

pub(crate) const FRAGMENT_OPERATION_PARAMS: &str = "fragment OperationParamsDetails on OperationParams { \
    __typename mode ledEnabled ledOffAt }";

pub(crate) const FRAGMENT_CONNECTION_STATE: &str = "fragment ConnectionStateDetails on ConnectionState { \
    __typename date \
    ... on ConnectedToUser { user { __typename id firstName lastName } } \
    ... on ConnectedToBase { chargingBase { __typename id } } \
    ... on ConnectedToCellular { signalStrengthPercent } }";

pub(crate) const FRAGMENT_DEVICE_DETAILS: &str = "fragment DeviceDetails on Device { \
    __typename id moduleId info nextLocationUpdateExpectedBy \
    operationParams { ...OperationParamsDetails } \
    lastConnectionState { ...ConnectionStateDetails } \
    ledColor { ...LedColorDetails } \
    availableLedColors { ...LedColorDetails } }";

pub(crate) const FRAGMENT_BASE_DETAILS: &str = "fragment BaseDetails on ChargingBase { \
    __typename baseId name infoLastUpdated networkName online onlineQuality \
    position { __typename latitude longitude } }";

pub(crate) const FRAGMENT_PET_PROFILE: &str = "fragment PetProfile on Pet { \
    __typename id name homeCityState yearOfBirth monthOfBirth dayOfBirth gender weight \
    breed { __typename id name } \
    photos { __typename first { __typename image { __typename fullSize } } } \
    device { ...DeviceDetails } }";

pub(crate) const FRAGMENT_POSITION: &str =
    "fragment PositionCoordinates on Position { __typename latitude longitude }";

pub(crate) const FRAGMENT_PLACE: &str =
    "fragment PlaceDetails on Place { __typename id name address }";

pub(crate) const FRAGMENT_ONGOING_ACTIVITY: &str = "fragment OngoingActivityDetails on OngoingActivity { \
    __typename start areaName lastReportTimestamp \
    ... on OngoingWalk { positions { __typename date position { ...PositionCoordinates } } } \
    ... on OngoingRest { position { ...PositionCoordinates } place { ...PlaceDetails } } }";

pub(crate) const FRAGMENT_ACTIVITY_SUMMARY: &str = "fragment ActivitySummaryDetails on ActivitySummary { \
    __typename start end totalSteps stepGoal totalDistance }";

pub(crate) const FRAGMENT_REST_SUMMARY: &str = "fragment RestSummaryDetails on RestSummary { \
    __typename start end \
    data { __typename ... on ConcreteRestSummaryData { sleepAmounts { __typename type duration } } } }";

// ── Queries ─────────────────────────────────────────────────────────

pub(crate) const QUERY_CURRENT_USER: &str = "query { currentUser { ...UserDetails } }";

pub(crate) const QUERY_HOUSEHOLDS: &str = "query { currentUser { __typename userHouseholds { \
    __typename household { __typename pets { ...PetProfile } bases { ...BaseDetails } } } } }";

pub(crate) const QUERY_PET_LOCATION: &str =
    "query PetLocation($petId: String!) { pet(id: $petId) { ongoingActivity { ...OngoingActivityDetails } } }";

pub(crate) const QUERY_PET_STATS: &str = "query PetStats($petId: String!) { pet(id: $petId) { \
    dailyStat: currentActivitySummary(period: DAILY) { ...ActivitySummaryDetails } \
    weeklyStat: currentActivitySummary(period: WEEKLY) { ...ActivitySummaryDetails } \
    monthlyStat: currentActivitySummary(period: MONTHLY) { ...ActivitySummaryDetails } } }";

pub(crate) const QUERY_PET_REST_STATS: &str = "query PetRestStats($petId: String!) { pet(id: $petId) { \
    dailyStat: restSummaryFeed(cursor: null, period: DAILY, limit: 1) { restSummaries { ...RestSummaryDetails } } \
    weeklyStat: restSummaryFeed(cursor: null, period: WEEKLY, limit: 1) { restSummaries { ...RestSummaryDetails } } \
    monthlyStat: restSummaryFeed(cursor: null, period: MONTHLY, limit: 1) { restSummaries { ...RestSummaryDetails } } } }";

pub(crate) const QUERY_DEVICE_DETAILS: &str =
    "query PetDevice($petId: String!) { pet(id: $petId) { __typename device { ...DeviceDetails } } }";

// ── Mutations ───────────────────────────────────────────────────────

pub(crate) const MUTATION_SET_LED_COLOR: &str = "mutation SetDeviceLed($moduleId: String!, $ledColorCode: Int!) { \
    setDeviceLed(moduleId: $moduleId, ledColorCode: $ledColorCode) { ...DeviceDetails } }";

pub(crate) const MUTATION_DEVICE_OPS: &str = "mutation UpdateDeviceOperationParams($input: UpdateDeviceOperationParamsInput!) { \
    updateDeviceOperationParams(input: $input) { ...DeviceDetails } }";

/// Concatenate a document with the fragments it references.
pub(crate) fn document(body: &str, fragments: &[&str]) -> String {
    let mut doc = String::from(body);
    for fragment in fragments {
        doc.push(' ');
        doc.push_str(fragment);
    }
    doc
}

/// Fragments needed by anything that selects `...DeviceDetails`.
pub(crate) const DEVICE_FRAGMENTS: &[&str] = &[
    FRAGMENT_DEVICE_DETAILS,
    FRAGMENT_OPERATION_PARAMS,
    FRAGMENT_CONNECTION_STATE,
    FRAGMENT_LED_DETAILS,
];
