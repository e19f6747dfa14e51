use serde::Serialize;

/// One entry of the services page; `id` doubles as the page anchor used by
/// the footer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceItem {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub content: &'static str,
}

pub const SERVICES: [ServiceItem; 6] = [
    ServiceItem {
        id: "recruitment-services",
        title: "Recruitment Services",
        summary: "IT and Non-IT hiring with end-to-end sourcing, screening, interviewing and placement.",
        image: "/image/Home/recruitement.png",
    },
    ServiceItem {
        id: "executive-search",
        title: "Executive Search",
        summary: "Research-led search for CXO, business heads and senior functional leaders.",
        image: "/image/Home/executive search.png",
    },
    ServiceItem {
        id: "staffing-services",
        title: "Staffing Services",
        summary: "Short-term staffing and long-term workforce management matched to your hiring needs.",
        image: "/image/Home/staff.png",
    },
    ServiceItem {
        id: "hr-outsourcing",
        title: "HR Outsourcing",
        summary: "Outsourced HR covering training, workforce planning, compliance and compensation strategy.",
        image: "/image/Home/HR.png",
    },
    ServiceItem {
        id: "payroll-services",
        title: "Payroll Services",
        summary: "Third-party payroll from onboarding to salary processing and statutory compliance.",
        image: "/image/Home/payroll.png",
    },
    ServiceItem {
        id: "training-development",
        title: "Training & Development",
        summary: "Tailored programs from technical upskilling to leadership development.",
        image: "/image/Home/training.png",
    },
];

pub const HIGHLIGHTS: [Highlight; 4] = [
    Highlight {
        title: "Expert Team",
        content: "Seasoned professionals across recruitment, payroll and development.",
    },
    Highlight {
        title: "Customized Approach",
        content: "Solutions shaped around your business needs and organizational culture.",
    },
    Highlight {
        title: "Efficient & Responsive",
        content: "Swift delivery so talent and HR requirements are met on time.",
    },
    Highlight {
        title: "Results-Driven Partnership",
        content: "Measurable outcomes toward a stronger workforce.",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ServicesPage {
    pub services: &'static [ServiceItem],
    pub highlights: &'static [Highlight],
}

pub fn services_page() -> ServicesPage {
    ServicesPage {
        services: &SERVICES,
        highlights: &HIGHLIGHTS,
    }
}

pub fn find_service(id: &str) -> Option<&'static ServiceItem> {
    SERVICES.iter().find(|service| service.id == id)
}
