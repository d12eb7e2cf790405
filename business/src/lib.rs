pub mod application {
    pub mod paper {
        pub mod convert;
    }
    pub mod pipeline {
        pub mod run;
    }
    pub mod summary {
        pub mod summarize_final;
        pub mod summarize_sections;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod paper {
        pub mod errors;
        pub mod link;
        pub mod markdown;
        pub mod model;
        pub mod progress;
        pub mod repository;
        pub mod services;
        pub mod use_cases {
            pub mod convert;
        }
    }
    pub mod pipeline {
        pub mod errors;
        pub mod model;
        pub mod use_cases {
            pub mod run;
        }
    }
    pub mod summary {
        pub mod errors;
        pub mod model;
        pub mod prompts;
        pub mod services;
        pub mod splitter;
        pub mod use_cases {
            pub mod summarize_final;
            pub mod summarize_sections;
        }
    }
}
