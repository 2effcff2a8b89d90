//! Static catalogue of every red and green flag the engine can raise.
//! Each entry carries the message returned to callers and a longer
//! explanation shown in the terminal UI. Rule code refers to entries by
//! their static, so a flag can never be raised without a catalogue entry.

use std::fmt;

/// Which checker a flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlagCategory {
    Domain,
    Qr,
    Profile,
}

impl fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagCategory::Domain => write!(f, "Domain"),
            FlagCategory::Qr => write!(f, "QR Content"),
            FlagCategory::Profile => write!(f, "Social Profile"),
        }
    }
}

/// Risk indicator or trust indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Red,
    Green,
}

/// Everything known about one flag.
#[derive(Debug)]
pub struct FlagDetail {
    /// Machine-readable identifier, e.g. "DOMAIN_RECENTLY_REGISTERED".
    pub code: &'static str,
    /// The string placed in `redFlags` / `greenFlags`.
    pub message: &'static str,
    pub category: FlagCategory,
    pub polarity: Polarity,
    pub description: &'static str,
}

// --- Domain: red ---

pub static DOMAIN_RECENTLY_REGISTERED: FlagDetail = FlagDetail {
    code: "DOMAIN_RECENTLY_REGISTERED",
    message: "Domain was registered less than 30 days ago",
    category: FlagCategory::Domain,
    polarity: Polarity::Red,
    description: "Phishing and scam sites are usually registered days before a campaign and abandoned soon after. A very young domain is one of the strongest single risk indicators.",
};

pub static DOMAIN_NO_DNS_RECORDS: FlagDetail = FlagDetail {
    code: "DOMAIN_NO_DNS_RECORDS",
    message: "No DNS records found for this domain",
    category: FlagCategory::Domain,
    polarity: Polarity::Red,
    description: "The domain does not resolve to any address, or its records could not be retrieved. Either the site does not exist, is misconfigured, or there was not enough data to judge it.",
};

pub static DOMAIN_NO_CERTIFICATE: FlagDetail = FlagDetail {
    code: "DOMAIN_NO_CERTIFICATE",
    message: "No SSL certificate found",
    category: FlagCategory::Domain,
    polarity: Polarity::Red,
    description: "No TLS certificate could be retrieved on port 443. Anything you send to this site may travel unencrypted and the site's identity cannot be confirmed.",
};

pub static DOMAIN_CERTIFICATE_EXPIRING: FlagDetail = FlagDetail {
    code: "DOMAIN_CERTIFICATE_EXPIRING",
    message: "SSL certificate expires within 30 days",
    category: FlagCategory::Domain,
    polarity: Polarity::Red,
    description: "The certificate is close to its expiry date. Well-run sites renew automatically well ahead of time; a certificate about to lapse often means the site is unmaintained.",
};

pub static DOMAIN_CERTIFICATE_EXPIRED: FlagDetail = FlagDetail {
    code: "DOMAIN_CERTIFICATE_EXPIRED",
    message: "SSL certificate has expired or is not trusted",
    category: FlagCategory::Domain,
    polarity: Polarity::Red,
    description: "The certificate is past its expiry date or failed verification. Browsers will warn about this site and the connection cannot be trusted.",
};

// --- Domain: green ---

pub static DOMAIN_ESTABLISHED: FlagDetail = FlagDetail {
    code: "DOMAIN_ESTABLISHED",
    message: "Domain has been registered for over a year",
    category: FlagCategory::Domain,
    polarity: Polarity::Green,
    description: "Long-lived domains are far less likely to be throwaway phishing infrastructure.",
};

pub static DOMAIN_VALID_CERTIFICATE: FlagDetail = FlagDetail {
    code: "DOMAIN_VALID_CERTIFICATE",
    message: "Valid SSL certificate",
    category: FlagCategory::Domain,
    polarity: Polarity::Green,
    description: "The site presents a certificate that verifies against trusted roots, so traffic is encrypted and the host name is authenticated.",
};

pub static DOMAIN_CERTIFICATE_LONG_VALIDITY: FlagDetail = FlagDetail {
    code: "DOMAIN_CERTIFICATE_LONG_VALIDITY",
    message: "SSL certificate is valid for more than 90 days",
    category: FlagCategory::Domain,
    polarity: Polarity::Green,
    description: "The certificate has plenty of remaining lifetime.",
};

pub static DOMAIN_DNS_CONFIGURED: FlagDetail = FlagDetail {
    code: "DOMAIN_DNS_CONFIGURED",
    message: "DNS records are properly configured",
    category: FlagCategory::Domain,
    polarity: Polarity::Green,
    description: "The domain resolves to at least one address.",
};

pub static DOMAIN_MAIL_CONFIGURED: FlagDetail = FlagDetail {
    code: "DOMAIN_MAIL_CONFIGURED",
    message: "Mail exchange records are present",
    category: FlagCategory::Domain,
    polarity: Polarity::Green,
    description: "The domain is set up to receive email, which is typical of real organisations.",
};

pub static DOMAIN_REPUTABLE: FlagDetail = FlagDetail {
    code: "DOMAIN_REPUTABLE",
    message: "Domain or registrar has a good reputation",
    category: FlagCategory::Domain,
    polarity: Polarity::Green,
    description: "The domain is on the allow-list of well-known sites, or it is registered through a registrar used by large, established organisations.",
};

// --- QR: red ---

pub static QR_NO_HTTPS: FlagDetail = FlagDetail {
    code: "QR_NO_HTTPS",
    message: "Link does not use HTTPS",
    category: FlagCategory::Qr,
    polarity: Polarity::Red,
    description: "The QR code opens a plain HTTP page. Anything entered there can be read or altered in transit.",
};

pub static QR_IP_HOST: FlagDetail = FlagDetail {
    code: "QR_IP_HOST",
    message: "Link points to a raw IP address instead of a domain name",
    category: FlagCategory::Qr,
    polarity: Polarity::Red,
    description: "Legitimate services almost never send people to bare IP addresses. This is a common way to avoid domain-based blocklists.",
};

pub static QR_SHORTENER: FlagDetail = FlagDetail {
    code: "QR_SHORTENER",
    message: "Link uses a URL shortener that hides the destination",
    category: FlagCategory::Qr,
    polarity: Polarity::Red,
    description: "Shortened links hide where you will actually end up. Expand them with a preview service before opening.",
};

pub static QR_SUSPICIOUS_TLD: FlagDetail = FlagDetail {
    code: "QR_SUSPICIOUS_TLD",
    message: "Link uses a top-level domain commonly associated with abuse",
    category: FlagCategory::Qr,
    polarity: Polarity::Red,
    description: "Some cheap or free top-level domains are heavily used for phishing and malware distribution.",
};

pub static QR_SUSPICIOUS_CONTENT: FlagDetail = FlagDetail {
    code: "QR_SUSPICIOUS_CONTENT",
    message: "Content contains suspicious patterns",
    category: FlagCategory::Qr,
    polarity: Polarity::Red,
    description: "The content matches wording or link structures typical of scams: urgency, prize bait, credential or payment requests, embedded credentials, look-alike domains or executable downloads.",
};

pub static QR_WEAK_WIFI: FlagDetail = FlagDetail {
    code: "QR_WEAK_WIFI",
    message: "Wi-Fi network is open or uses weak encryption",
    category: FlagCategory::Qr,
    polarity: Polarity::Red,
    description: "Open and WEP networks let anyone nearby read your traffic. Rogue hotspots are often advertised this way.",
};

// --- QR: green ---

pub static QR_HTTPS: FlagDetail = FlagDetail {
    code: "QR_HTTPS",
    message: "Link uses HTTPS",
    category: FlagCategory::Qr,
    polarity: Polarity::Green,
    description: "The destination is reached over an encrypted connection.",
};

pub static QR_KNOWN_DESTINATION: FlagDetail = FlagDetail {
    code: "QR_KNOWN_DESTINATION",
    message: "Link points to a well-known domain",
    category: FlagCategory::Qr,
    polarity: Polarity::Green,
    description: "The destination host is on the allow-list of well-known sites.",
};

pub static QR_NOT_A_LINK: FlagDetail = FlagDetail {
    code: "QR_NOT_A_LINK",
    message: "Content does not open a web page",
    category: FlagCategory::Qr,
    polarity: Polarity::Green,
    description: "The QR code carries data rather than a link, so scanning it will not take you to a website.",
};

pub static QR_NO_SUSPICIOUS_PATTERNS: FlagDetail = FlagDetail {
    code: "QR_NO_SUSPICIOUS_PATTERNS",
    message: "No suspicious patterns detected",
    category: FlagCategory::Qr,
    polarity: Polarity::Green,
    description: "None of the known scam patterns matched the content.",
};

pub static QR_SECURE_WIFI: FlagDetail = FlagDetail {
    code: "QR_SECURE_WIFI",
    message: "Wi-Fi network uses WPA encryption",
    category: FlagCategory::Qr,
    polarity: Polarity::Green,
    description: "The advertised network uses modern encryption.",
};

// --- Profile: red ---

pub static PROFILE_NEW_ACCOUNT: FlagDetail = FlagDetail {
    code: "PROFILE_NEW_ACCOUNT",
    message: "Account was created less than 30 days ago",
    category: FlagCategory::Profile,
    polarity: Polarity::Red,
    description: "Impersonation and scam accounts are typically very new, because older ones get reported and suspended.",
};

pub static PROFILE_NO_ACTIVITY: FlagDetail = FlagDetail {
    code: "PROFILE_NO_ACTIVITY",
    message: "No posts or activity found",
    category: FlagCategory::Profile,
    polarity: Polarity::Red,
    description: "The account has never posted, or no activity could be retrieved for it.",
};

pub static PROFILE_NO_PICTURE: FlagDetail = FlagDetail {
    code: "PROFILE_NO_PICTURE",
    message: "Profile has no picture",
    category: FlagCategory::Profile,
    polarity: Polarity::Red,
    description: "Throwaway and automated accounts often keep the platform's default avatar.",
};

pub static PROFILE_FOLLOW_RATIO: FlagDetail = FlagDetail {
    code: "PROFILE_FOLLOW_RATIO",
    message: "Follows far more accounts than follow it back",
    category: FlagCategory::Profile,
    polarity: Polarity::Red,
    description: "Mass-following with little reciprocation is typical of spam and bot accounts trying to build reach.",
};

pub static PROFILE_FEW_FOLLOWERS: FlagDetail = FlagDetail {
    code: "PROFILE_FEW_FOLLOWERS",
    message: "Very few followers",
    category: FlagCategory::Profile,
    polarity: Polarity::Red,
    description: "An account claiming to be a person or brand of note but followed by almost nobody deserves scrutiny.",
};

// --- Profile: green ---

pub static PROFILE_ESTABLISHED: FlagDetail = FlagDetail {
    code: "PROFILE_ESTABLISHED",
    message: "Account has been active for over a year",
    category: FlagCategory::Profile,
    polarity: Polarity::Green,
    description: "Long-lived accounts are less likely to be throwaway scam accounts.",
};

pub static PROFILE_VERIFIED: FlagDetail = FlagDetail {
    code: "PROFILE_VERIFIED",
    message: "Account is verified",
    category: FlagCategory::Profile,
    polarity: Polarity::Green,
    description: "The platform has verified this account.",
};

pub static PROFILE_LARGE_AUDIENCE: FlagDetail = FlagDetail {
    code: "PROFILE_LARGE_AUDIENCE",
    message: "Established follower base",
    category: FlagCategory::Profile,
    polarity: Polarity::Green,
    description: "The account is followed by at least a thousand other accounts.",
};

pub static PROFILE_REGULAR_POSTING: FlagDetail = FlagDetail {
    code: "PROFILE_REGULAR_POSTING",
    message: "Regular posting activity",
    category: FlagCategory::Profile,
    polarity: Polarity::Green,
    description: "The account has a meaningful posting history.",
};

pub static PROFILE_COMPLETE: FlagDetail = FlagDetail {
    code: "PROFILE_COMPLETE",
    message: "Profile is complete",
    category: FlagCategory::Profile,
    polarity: Polarity::Green,
    description: "The profile has both a picture and a bio.",
};

pub static PROFILE_OFFICIAL: FlagDetail = FlagDetail {
    code: "PROFILE_OFFICIAL",
    message: "Recognised official account",
    category: FlagCategory::Profile,
    polarity: Polarity::Green,
    description: "The handle is on the allow-list of known official accounts for this platform.",
};

/// Every flag, in catalogue order.
#[cfg(test)]
static FLAGS: &[&FlagDetail] = &[
    &DOMAIN_RECENTLY_REGISTERED,
    &DOMAIN_NO_DNS_RECORDS,
    &DOMAIN_NO_CERTIFICATE,
    &DOMAIN_CERTIFICATE_EXPIRING,
    &DOMAIN_CERTIFICATE_EXPIRED,
    &DOMAIN_ESTABLISHED,
    &DOMAIN_VALID_CERTIFICATE,
    &DOMAIN_CERTIFICATE_LONG_VALIDITY,
    &DOMAIN_DNS_CONFIGURED,
    &DOMAIN_MAIL_CONFIGURED,
    &DOMAIN_REPUTABLE,
    &QR_NO_HTTPS,
    &QR_IP_HOST,
    &QR_SHORTENER,
    &QR_SUSPICIOUS_TLD,
    &QR_SUSPICIOUS_CONTENT,
    &QR_WEAK_WIFI,
    &QR_HTTPS,
    &QR_KNOWN_DESTINATION,
    &QR_NOT_A_LINK,
    &QR_NO_SUSPICIOUS_PATTERNS,
    &QR_SECURE_WIFI,
    &PROFILE_NEW_ACCOUNT,
    &PROFILE_NO_ACTIVITY,
    &PROFILE_NO_PICTURE,
    &PROFILE_FOLLOW_RATIO,
    &PROFILE_FEW_FOLLOWERS,
    &PROFILE_ESTABLISHED,
    &PROFILE_VERIFIED,
    &PROFILE_LARGE_AUDIENCE,
    &PROFILE_REGULAR_POSTING,
    &PROFILE_COMPLETE,
    &PROFILE_OFFICIAL,
];

/// Retrieves the full detail for a flag code, or `None` if the code is unknown.
#[cfg(test)]
fn get_flag_detail(code: &str) -> Option<&'static FlagDetail> {
    FLAGS.iter().copied().find(|f| f.code == code)
}
